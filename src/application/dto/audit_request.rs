use crate::release_audit::policies::AttributionMode;
use std::path::PathBuf;

/// AuditRequest - Internal request DTO for the release audit use case
///
/// Carries the resolved settings (CLI over config file over defaults) the
/// controller needs for one batch.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Root under which each release gets its own workspace directory
    pub work_dir: PathBuf,
    /// Drop prereleases from the feed before processing
    pub skip_prereleases: bool,
    /// Query the vulnerability database for every aggregated id
    pub enrich: bool,
    /// Attribution mode for the match aggregator
    pub attribution_mode: AttributionMode,
}

impl AuditRequest {
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            skip_prereleases: false,
            enrich: false,
            attribution_mode: AttributionMode::default(),
        }
    }

    pub fn with_skip_prereleases(mut self, skip_prereleases: bool) -> Self {
        self.skip_prereleases = skip_prereleases;
        self
    }

    pub fn with_enrichment(mut self, enrich: bool) -> Self {
        self.enrich = enrich;
        self
    }

    pub fn with_attribution_mode(mut self, attribution_mode: AttributionMode) -> Self {
        self.attribution_mode = attribution_mode;
        self
    }
}
