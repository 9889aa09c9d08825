use crate::release_audit::domain::{Attribution, ScanMatch, VulnerabilityRecord};
use crate::release_audit::policies::AttributionMode;
use indexmap::IndexMap;

/// MatchAggregator service folding a release's scan matches into one
/// VulnerabilityRecord per vulnerability id.
///
/// Pure business logic, no I/O. For every match and every related id it
/// carries, in scanner order:
/// - an unseen id creates a record from the match's artifact and a copy of its urls
/// - a seen id gets its artifact fields overwritten by this match and this
///   match's urls appended (duplicates are kept)
///
/// Records come out in first-seen order of their id.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAggregator {
    mode: AttributionMode,
}

impl MatchAggregator {
    pub fn new(mode: AttributionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AttributionMode {
        self.mode
    }

    /// Aggregates scan matches into finalized vulnerability records
    pub fn aggregate(&self, matches: &[ScanMatch]) -> Vec<VulnerabilityRecord> {
        let mut records: IndexMap<String, VulnerabilityRecord> = IndexMap::new();

        for scan_match in matches {
            for cve_id in scan_match.related_vulnerability_ids() {
                if cve_id.is_empty() {
                    continue;
                }

                let record = records.entry(cve_id.clone()).or_insert_with(|| {
                    VulnerabilityRecord::new(
                        cve_id.clone(),
                        String::new(),
                        String::new(),
                        Vec::new(),
                    )
                });

                record.artifact_name = scan_match.artifact_name().to_string();
                record.artifact_version = scan_match.artifact_version().to_string();
                record.urls.extend_from_slice(scan_match.cve_urls());

                if self.mode == AttributionMode::AllAttributions {
                    record.attributions.push(Attribution {
                        artifact_name: scan_match.artifact_name().to_string(),
                        artifact_version: scan_match.artifact_version().to_string(),
                        urls: scan_match.cve_urls().to_vec(),
                    });
                }
            }
        }

        records.into_values().collect()
    }
}
