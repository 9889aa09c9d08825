use crate::release_audit::domain::{EnrichedVulnerability, ReleaseOutcome, VulnerabilityRecord};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// AuditResponse - result of one batch
///
/// `results` is the pipeline's externally visible contract: release tag to
/// finalized records, in feed order, holding only releases that completed.
#[derive(Debug, Clone)]
pub struct AuditResponse {
    pub summary: AuditSummary,
    pub results: IndexMap<String, Vec<VulnerabilityRecord>>,
    pub enriched: IndexMap<String, Vec<EnrichedVulnerability>>,
}

impl AuditResponse {
    pub fn outcomes(&self) -> &[ReleaseOutcome] {
        &self.summary.releases
    }

    pub fn has_aborted_releases(&self) -> bool {
        self.summary.aborted > 0
    }
}

/// AuditSummary - the run-level document handed to the persistence collaborator
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub source: String,
    pub attribution_mode: String,
    pub enrichment: bool,
    pub total_releases: usize,
    pub completed: usize,
    pub aborted: usize,
    pub distinct_vulnerabilities: usize,
    pub releases: Vec<ReleaseOutcome>,
}

impl AuditSummary {
    pub fn new(source: String, attribution_mode: String, enrichment: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source,
            attribution_mode,
            enrichment,
            total_releases: 0,
            completed: 0,
            aborted: 0,
            distinct_vulnerabilities: 0,
            releases: Vec::new(),
        }
    }

    /// Appends one release outcome and updates the counters
    pub fn record(&mut self, outcome: ReleaseOutcome) {
        self.total_releases += 1;
        if outcome.is_done() {
            self.completed += 1;
        } else {
            self.aborted += 1;
        }
        self.releases.push(outcome);
    }
}
