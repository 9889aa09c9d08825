use crate::release_audit::domain::EnrichedVulnerability;
use std::path::PathBuf;

/// ImportResponse - records read from an offline NVD feed directory
#[derive(Debug, Clone, Default)]
pub struct ImportResponse {
    pub records: Vec<EnrichedVulnerability>,
    pub files_read: Vec<PathBuf>,
    /// Feed files that could not be parsed, with the reason
    pub files_skipped: Vec<(PathBuf, String)>,
}

impl ImportResponse {
    pub fn scored_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_scoring()).count()
    }
}
