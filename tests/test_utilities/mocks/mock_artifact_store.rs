use release_cve_audit::prelude::*;
use release_cve_audit::shared::error::AuditError;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock ArtifactStore creating an empty workspace per release
///
/// Tags listed as download or extraction failures return the matching error.
#[derive(Default, Clone)]
pub struct MockArtifactStore {
    pub download_failures: Vec<String>,
    pub extraction_failures: Vec<String>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl MockArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_download(mut self, tag: &str) -> Self {
        self.download_failures.push(tag.to_string());
        self
    }

    pub fn failing_extraction(mut self, tag: &str) -> Self {
        self.extraction_failures.push(tag.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl ArtifactStore for MockArtifactStore {
    fn fetch_and_extract(&self, release: &Release, destination: &Path) -> Result<ExtractedArtifact> {
        self.fetched.lock().unwrap().push(release.tag().to_string());

        if self.download_failures.iter().any(|t| t == release.tag()) {
            return Err(AuditError::DownloadFailed {
                url: release.tarball_url().to_string(),
                details: "HTTP status 404".to_string(),
            }
            .into());
        }
        if self.extraction_failures.iter().any(|t| t == release.tag()) {
            return Err(AuditError::ExtractionFailed {
                path: destination.join(format!("{}.tar.gz", release.file_stem())),
                details: "invalid gzip header".to_string(),
            }
            .into());
        }

        let source = destination.join("source");
        std::fs::create_dir_all(&source)?;
        Ok(ExtractedArtifact::new(
            release.tag().to_string(),
            destination.to_path_buf(),
            source,
            false,
        ))
    }
}
