/// A scanner finding: one artifact implicated by one or more vulnerability ids.
///
/// `related_vulnerability_ids` keeps scanner order; the aggregator relies on
/// it for first-seen ordering of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    artifact_name: String,
    artifact_version: String,
    cve_urls: Vec<String>,
    related_vulnerability_ids: Vec<String>,
}

impl ScanMatch {
    pub fn new(
        artifact_name: String,
        artifact_version: String,
        cve_urls: Vec<String>,
        related_vulnerability_ids: Vec<String>,
    ) -> Self {
        Self {
            artifact_name,
            artifact_version,
            cve_urls,
            related_vulnerability_ids,
        }
    }

    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    pub fn artifact_version(&self) -> &str {
        &self.artifact_version
    }

    pub fn cve_urls(&self) -> &[String] {
        &self.cve_urls
    }

    pub fn related_vulnerability_ids(&self) -> &[String] {
        &self.related_vulnerability_ids
    }
}
