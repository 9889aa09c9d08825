/// Release audit domain: value objects, the aggregation service and the
/// policies that parameterize it. Free of I/O.
pub mod domain;
pub mod policies;
pub mod services;
