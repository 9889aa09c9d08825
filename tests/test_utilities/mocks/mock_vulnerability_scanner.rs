use release_cve_audit::prelude::*;
use release_cve_audit::shared::error::AuditError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityScanner returning canned matches per release tag
#[derive(Default, Clone)]
pub struct MockVulnerabilityScanner {
    pub matches: HashMap<String, Vec<ScanMatch>>,
    pub malformed: Vec<String>,
    pub scanned: Arc<Mutex<Vec<String>>>,
}

impl MockVulnerabilityScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a match for `tag` on `name@version` naming the given ids
    pub fn with_match(mut self, tag: &str, name: &str, version: &str, urls: &[&str], ids: &[&str]) -> Self {
        self.matches
            .entry(tag.to_string())
            .or_default()
            .push(ScanMatch::new(
                name.to_string(),
                version.to_string(),
                urls.iter().map(|u| u.to_string()).collect(),
                ids.iter().map(|i| i.to_string()).collect(),
            ));
        self
    }

    pub fn with_malformed_output(mut self, tag: &str) -> Self {
        self.malformed.push(tag.to_string());
        self
    }

    pub fn scanned(&self) -> Vec<String> {
        self.scanned.lock().unwrap().clone()
    }
}

impl VulnerabilityScanner for MockVulnerabilityScanner {
    fn scan(&self, sbom: &SbomDocument) -> Result<Vec<ScanMatch>> {
        self.scanned
            .lock()
            .unwrap()
            .push(sbom.release_tag().to_string());

        if self.malformed.iter().any(|t| t == sbom.release_tag()) {
            return Err(AuditError::MalformedToolOutput {
                tool: "grype".to_string(),
                path: PathBuf::from(format!("{}.grype.json", sbom.release_tag())),
                details: "expected value at line 1 column 1".to_string(),
            }
            .into());
        }
        Ok(self
            .matches
            .get(sbom.release_tag())
            .cloned()
            .unwrap_or_default())
    }
}
