use release_cve_audit::prelude::*;
use release_cve_audit::release_audit::domain::CvssVersion;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityDatabase knowing a fixed set of v3.1 base scores
#[derive(Default, Clone)]
pub struct MockVulnerabilityDatabase {
    pub scores: HashMap<String, f64>,
    pub lookups: Arc<Mutex<Vec<String>>>,
}

impl MockVulnerabilityDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, cve_id: &str, base_score: f64) -> Self {
        self.scores.insert(cve_id.to_string(), base_score);
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl VulnerabilityDatabase for MockVulnerabilityDatabase {
    fn lookup(&self, cve_id: &str) -> Option<EnrichedVulnerability> {
        self.lookups.lock().unwrap().push(cve_id.to_string());
        self.scores.get(cve_id).map(|score| {
            EnrichedVulnerability::new(
                cve_id.to_string(),
                Some("2024-03-01T12:00:00.000".to_string()),
                Some(CvssScoring {
                    version: CvssVersion::V31,
                    vector_string: Some("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H".to_string()),
                    base_score: Some(*score),
                    impact_score: Some(5.9),
                    exploitability_score: Some(3.9),
                    severity: Some("CRITICAL".to_string()),
                }),
            )
        })
    }
}
