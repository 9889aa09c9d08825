use release_cve_audit::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock AuditResultSink keeping every persisted document in memory
#[derive(Default, Clone)]
pub struct MockResultSink {
    pub releases: Arc<Mutex<Vec<String>>>,
    pub records: Arc<Mutex<HashMap<String, Vec<VulnerabilityRecord>>>>,
    pub enriched: Arc<Mutex<HashMap<String, Vec<EnrichedVulnerability>>>>,
    pub summaries: Arc<Mutex<Vec<AuditSummary>>>,
    pub fail_for: Vec<String>,
}

impl MockResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, tag: &str) -> Self {
        self.fail_for.push(tag.to_string());
        self
    }

    pub fn records_for(&self, tag: &str) -> Option<Vec<VulnerabilityRecord>> {
        self.records.lock().unwrap().get(tag).cloned()
    }

    pub fn enriched_for(&self, tag: &str) -> Option<Vec<EnrichedVulnerability>> {
        self.enriched.lock().unwrap().get(tag).cloned()
    }

    pub fn last_summary(&self) -> Option<AuditSummary> {
        self.summaries.lock().unwrap().last().cloned()
    }
}

impl AuditResultSink for MockResultSink {
    fn persist_releases(&self, releases: &[Release]) -> Result<()> {
        let mut persisted = self.releases.lock().unwrap();
        persisted.clear();
        persisted.extend(releases.iter().map(|r| r.tag().to_string()));
        Ok(())
    }

    fn persist_release(
        &self,
        release: &Release,
        records: &[VulnerabilityRecord],
        enriched: Option<&[EnrichedVulnerability]>,
    ) -> Result<()> {
        if self.fail_for.iter().any(|t| t == release.tag()) {
            anyhow::bail!("disk full");
        }
        self.records
            .lock()
            .unwrap()
            .insert(release.tag().to_string(), records.to_vec());
        if let Some(enriched) = enriched {
            self.enriched
                .lock()
                .unwrap()
                .insert(release.tag().to_string(), enriched.to_vec());
        }
        Ok(())
    }

    fn persist_summary(&self, summary: &AuditSummary) -> Result<()> {
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }
}
