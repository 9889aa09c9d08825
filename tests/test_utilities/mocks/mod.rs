/// Mock implementations for testing
mod mock_artifact_store;
mod mock_progress_reporter;
mod mock_release_feed;
mod mock_result_sink;
mod mock_sbom_generator;
mod mock_vulnerability_database;
mod mock_vulnerability_scanner;

pub use mock_artifact_store::MockArtifactStore;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_release_feed::{release, MockReleaseFeed};
pub use mock_result_sink::MockResultSink;
pub use mock_sbom_generator::MockSbomGenerator;
pub use mock_vulnerability_database::MockVulnerabilityDatabase;
pub use mock_vulnerability_scanner::MockVulnerabilityScanner;
