/// Data Transfer Objects for application layer
///
/// DTOs carry resolved settings into the use cases and batch results out
/// of them, keeping the domain layer isolated from CLI and file formats.
mod audit_request;
mod audit_response;
mod import_response;

pub use audit_request::AuditRequest;
pub use audit_response::{AuditResponse, AuditSummary};
pub use import_response::ImportResponse;
