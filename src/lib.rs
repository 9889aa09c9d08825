//! release-cve-audit - correlate published releases with the vulnerabilities
//! introduced by their dependency trees
//!
//! For every release of a repository the pipeline downloads the source
//! tarball, generates an SBOM with `syft`, scans it with `grype`, collapses
//! the matches to one record per vulnerability id and optionally enriches
//! each id with CVSS scoring from the NVD. The code follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`release_audit`): value objects, the match aggregator and its policies
//! - **Application Layer** (`application`): the audit and NVD import use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): GitHub, NVD, syft, grype and filesystem implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use release_cve_audit::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = AuditReleasesUseCase::new(
//!     GitHubReleaseFeed::new("anchore/syft")?,
//!     HttpArtifactStore::new()?,
//!     SyftSbomGenerator::default(),
//!     GrypeScanner::default(),
//!     Some(NvdClient::new()?),
//!     JsonResultWriter::new(PathBuf::from("reports")),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = AuditRequest::new(PathBuf::from("/tmp/audit")).with_enrichment(true);
//! let response = use_case.execute(request)?;
//! for (tag, records) in &response.results {
//!     println!("{}: {} vulnerabilities", tag, records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod release_audit;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        JsonFileReleaseFeed, JsonResultWriter, NvdFeedImporter,
    };
    pub use crate::adapters::outbound::network::{GitHubReleaseFeed, HttpArtifactStore, NvdClient};
    pub use crate::adapters::outbound::tools::{GrypeScanner, SyftSbomGenerator};
    pub use crate::application::dto::{AuditRequest, AuditResponse, AuditSummary, ImportResponse};
    pub use crate::application::use_cases::{AuditReleasesUseCase, ImportNvdFeedUseCase};
    pub use crate::ports::outbound::{
        ArtifactStore, AuditResultSink, NvdFeedReader, ProgressReporter, ReleaseFeed,
        SbomGenerator, VulnerabilityDatabase, VulnerabilityScanner,
    };
    pub use crate::release_audit::domain::{
        CvssScoring, EnrichedVulnerability, ExtractedArtifact, PipelineStage, Release,
        ReleaseOutcome, ReleaseStatus, ScanMatch, SbomDocument, VulnerabilityRecord,
    };
    pub use crate::release_audit::policies::{AttributionMode, CvssPolicy};
    pub use crate::release_audit::services::MatchAggregator;
    pub use crate::shared::Result;
}
