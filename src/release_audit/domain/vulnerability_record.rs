use serde::{Deserialize, Serialize};

/// One artifact a vulnerability was attributed to, with the urls that match carried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub artifact_name: String,
    pub artifact_version: String,
    pub urls: Vec<String>,
}

/// VulnerabilityRecord - the aggregation's unit of output, unique per `cve_id`
/// within one release.
///
/// `artifact_name`/`artifact_version` hold the most recently seen attribution and
/// `urls` is the concatenation of every contributing match's urls, duplicates
/// included. `attributions` is only populated in full-attribution mode and is
/// omitted from the serialized document otherwise, so the default output keeps
/// the four-field shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub cve_id: String,
    pub artifact_name: String,
    pub artifact_version: String,
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributions: Vec<Attribution>,
}

impl VulnerabilityRecord {
    pub fn new(
        cve_id: String,
        artifact_name: String,
        artifact_version: String,
        urls: Vec<String>,
    ) -> Self {
        Self {
            cve_id,
            artifact_name,
            artifact_version,
            urls,
            attributions: Vec::new(),
        }
    }
}
