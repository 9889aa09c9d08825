use crate::application::dto::AuditSummary;
use crate::release_audit::domain::{EnrichedVulnerability, Release, VulnerabilityRecord};
use crate::shared::Result;

/// AuditResultSink port: the persistence collaborator
///
/// The pipeline's responsibility ends once a document has been handed off here.
pub trait AuditResultSink {
    /// Stores the release list a run consumed
    fn persist_releases(&self, releases: &[Release]) -> Result<()>;

    /// Stores one release's finalized records, and their enrichment if it ran
    fn persist_release(
        &self,
        release: &Release,
        records: &[VulnerabilityRecord],
        enriched: Option<&[EnrichedVulnerability]>,
    ) -> Result<()>;

    /// Stores the run summary once every release has been processed
    fn persist_summary(&self, summary: &AuditSummary) -> Result<()>;
}
