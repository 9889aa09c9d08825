/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the release pipeline uses to reach
/// external systems: the release feed, artifact hosting, the SBOM generator,
/// the vulnerability scanner, the vulnerability database (live or offline feed)
/// and persistence.
pub mod artifact_store;
pub mod nvd_feed_reader;
pub mod progress_reporter;
pub mod release_feed;
pub mod result_sink;
pub mod sbom_generator;
pub mod vulnerability_database;
pub mod vulnerability_scanner;

pub use artifact_store::ArtifactStore;
pub use nvd_feed_reader::NvdFeedReader;
pub use progress_reporter::ProgressReporter;
pub use release_feed::ReleaseFeed;
pub use result_sink::AuditResultSink;
pub use sbom_generator::SbomGenerator;
pub use vulnerability_database::VulnerabilityDatabase;
pub use vulnerability_scanner::VulnerabilityScanner;
