pub mod attribution_mode;
pub mod cvss_policy;

pub use attribution_mode::AttributionMode;
pub use cvss_policy::CvssPolicy;
