use release_cve_audit::prelude::*;
use release_cve_audit::shared::error::AuditError;
use std::sync::{Arc, Mutex};

/// Mock SbomGenerator; tags in `failures` behave like a syft crash
#[derive(Default, Clone)]
pub struct MockSbomGenerator {
    pub failures: Vec<String>,
    pub generated: Arc<Mutex<Vec<String>>>,
}

impl MockSbomGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, tag: &str) -> Self {
        self.failures.push(tag.to_string());
        self
    }

    pub fn generated(&self) -> Vec<String> {
        self.generated.lock().unwrap().clone()
    }
}

impl SbomGenerator for MockSbomGenerator {
    fn generate(&self, artifact: &ExtractedArtifact) -> Result<SbomDocument> {
        self.generated
            .lock()
            .unwrap()
            .push(artifact.release_tag().to_string());

        if self.failures.iter().any(|t| t == artifact.release_tag()) {
            return Err(AuditError::ToolFailed {
                tool: "syft".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "could not determine source".to_string(),
            }
            .into());
        }
        Ok(SbomDocument::new(
            artifact.release_tag().to_string(),
            artifact.output_path("sbom.json"),
        ))
    }
}
