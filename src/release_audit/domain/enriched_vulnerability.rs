use serde::{Deserialize, Serialize};

/// CVSS major version a score was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CvssVersion {
    #[serde(rename = "3.1")]
    V31,
    #[serde(rename = "2")]
    V2,
}

impl std::fmt::Display for CvssVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CvssVersion::V31 => write!(f, "3.1"),
            CvssVersion::V2 => write!(f, "2"),
        }
    }
}

/// Scoring block selected from a vulnerability database entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvssScoring {
    pub version: CvssVersion,
    pub vector_string: Option<String>,
    pub base_score: Option<f64>,
    pub impact_score: Option<f64>,
    pub exploitability_score: Option<f64>,
    pub severity: Option<String>,
}

/// EnrichedVulnerability - authoritative severity data for one cve_id.
///
/// Every scoring field is absent when the database entry carries no usable
/// metric block; the record itself still exists in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVulnerability {
    pub cve_id: String,
    pub published_date: Option<String>,
    pub cvss_version: Option<CvssVersion>,
    pub vector_string: Option<String>,
    pub base_score: Option<f64>,
    pub impact_score: Option<f64>,
    pub exploitability_score: Option<f64>,
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<String>,
}

impl EnrichedVulnerability {
    pub fn new(cve_id: String, published_date: Option<String>, scoring: Option<CvssScoring>) -> Self {
        let mut enriched = Self {
            cve_id,
            published_date,
            cvss_version: None,
            vector_string: None,
            base_score: None,
            impact_score: None,
            exploitability_score: None,
            severity: None,
            last_modified_date: None,
            cwe_id: None,
        };
        if let Some(scoring) = scoring {
            enriched.cvss_version = Some(scoring.version);
            enriched.vector_string = scoring.vector_string;
            enriched.base_score = scoring.base_score;
            enriched.impact_score = scoring.impact_score;
            enriched.exploitability_score = scoring.exploitability_score;
            enriched.severity = scoring.severity;
        }
        enriched
    }

    pub fn with_last_modified(mut self, last_modified_date: Option<String>) -> Self {
        self.last_modified_date = last_modified_date;
        self
    }

    pub fn with_cwe(mut self, cwe_id: Option<String>) -> Self {
        self.cwe_id = cwe_id;
        self
    }

    pub fn has_scoring(&self) -> bool {
        self.cvss_version.is_some()
    }
}
