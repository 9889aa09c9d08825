/// Use cases module containing application business logic orchestration
mod audit_releases;
mod import_nvd_feed;

pub use audit_releases::AuditReleasesUseCase;
pub use import_nvd_feed::ImportNvdFeedUseCase;
