use crate::ports::outbound::NvdFeedReader;
use crate::release_audit::domain::{CvssScoring, CvssVersion, EnrichedVulnerability};
use crate::release_audit::policies::CvssPolicy;
use crate::shared::error::AuditError;
use crate::shared::security::read_bounded_file;
use crate::shared::Result;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp layout of the legacy feed (`2019-10-14T13:15Z`)
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%MZ";
const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// NvdFeedImporter adapter reading downloaded NVD 1.1 JSON feeds
/// (`nvdcve-1.1-<year>.json`)
///
/// Uses `CvssPolicy::V31ThenV2` unless told otherwise: the v3 block is
/// reported as "3.1", and entries that only carry v2 scoring fall back to
/// the v2 block with the severity read from the metric, not the vector data.
pub struct NvdFeedImporter {
    policy: CvssPolicy,
}

impl NvdFeedImporter {
    pub fn new() -> Self {
        Self {
            policy: CvssPolicy::V31ThenV2,
        }
    }

    pub fn with_policy(mut self, policy: CvssPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn convert(&self, item: FeedItem) -> EnrichedVulnerability {
        let v3 = item.impact.base_metric_v3.and_then(|m| {
            let data = m.cvss_v3?;
            Some(CvssScoring {
                version: CvssVersion::V31,
                vector_string: data.vector_string,
                base_score: data.base_score,
                impact_score: m.impact_score,
                exploitability_score: m.exploitability_score,
                severity: data.base_severity,
            })
        });
        let v2 = item.impact.base_metric_v2.and_then(|m| {
            let data = m.cvss_v2?;
            Some(CvssScoring {
                version: CvssVersion::V2,
                vector_string: data.vector_string,
                base_score: data.base_score,
                impact_score: m.impact_score,
                exploitability_score: m.exploitability_score,
                severity: m.severity,
            })
        });

        let cwe_id = item
            .cve
            .problemtype
            .problemtype_data
            .into_iter()
            .next()
            .and_then(|p| p.description.into_iter().next())
            .map(|d| d.value);

        EnrichedVulnerability::new(
            item.cve.cve_data_meta.id,
            item.published_date.as_deref().and_then(normalize_timestamp),
            self.policy.select(v3, v2),
        )
        .with_last_modified(item.last_modified_date.as_deref().and_then(normalize_timestamp))
        .with_cwe(cwe_id)
    }
}

impl Default for NvdFeedImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl NvdFeedReader for NvdFeedImporter {
    fn feed_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| AuditError::InvalidPath {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|name| name.contains("nvdcve") && name.ends_with(".json"))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_feed(&self, path: &Path) -> Result<Vec<EnrichedVulnerability>> {
        let content = read_bounded_file(path, "NVD feed")?;
        let feed: Feed = serde_json::from_str(&content).map_err(|e| AuditError::FileReadError {
            path: path.to_path_buf(),
            details: format!("not an NVD 1.1 feed: {}", e),
        })?;
        Ok(feed
            .items
            .into_iter()
            .map(|item| self.convert(item))
            .collect())
    }
}

/// Rewrites a feed timestamp as `YYYY-MM-DD HH:MM:SS`; unparseable values are dropped
fn normalize_timestamp(raw: &str) -> Option<String> {
    match NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT) {
        Ok(ts) => Some(ts.format(OUTPUT_TIMESTAMP_FORMAT).to_string()),
        Err(e) => {
            tracing::debug!(value = raw, "unparseable feed timestamp: {}", e);
            None
        }
    }
}

// NVD 1.1 feed structures

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "CVE_Items", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedItem {
    cve: FeedCve,
    #[serde(default)]
    impact: FeedImpact,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    last_modified_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedCve {
    #[serde(rename = "CVE_data_meta")]
    cve_data_meta: FeedCveMeta,
    #[serde(default)]
    problemtype: FeedProblemType,
}

#[derive(Debug, Deserialize)]
struct FeedCveMeta {
    #[serde(rename = "ID")]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct FeedProblemType {
    #[serde(default)]
    problemtype_data: Vec<FeedProblemTypeData>,
}

#[derive(Debug, Deserialize)]
struct FeedProblemTypeData {
    #[serde(default)]
    description: Vec<FeedDescription>,
}

#[derive(Debug, Deserialize)]
struct FeedDescription {
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedImpact {
    #[serde(default)]
    base_metric_v3: Option<FeedBaseMetricV3>,
    #[serde(default)]
    base_metric_v2: Option<FeedBaseMetricV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedBaseMetricV3 {
    #[serde(rename = "cvssV3", default)]
    cvss_v3: Option<FeedCvssV3>,
    #[serde(default)]
    impact_score: Option<f64>,
    #[serde(default)]
    exploitability_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedCvssV3 {
    #[serde(default)]
    vector_string: Option<String>,
    #[serde(default)]
    base_score: Option<f64>,
    #[serde(default)]
    base_severity: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedBaseMetricV2 {
    #[serde(rename = "cvssV2", default)]
    cvss_v2: Option<FeedCvssV2>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    impact_score: Option<f64>,
    #[serde(default)]
    exploitability_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedCvssV2 {
    #[serde(default)]
    vector_string: Option<String>,
    #[serde(default)]
    base_score: Option<f64>,
}
