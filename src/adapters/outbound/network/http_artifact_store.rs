use super::http_transport::build_client;
use crate::ports::outbound::ArtifactStore;
use crate::release_audit::domain::{ExtractedArtifact, Release};
use crate::shared::error::AuditError;
use crate::shared::security::{ensure_directory, validate_regular_file};
use crate::shared::Result;
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory name of the extracted tree inside a release workspace
const SOURCE_DIR: &str = "source";

/// HttpArtifactStore adapter downloading and unpacking release tarballs
///
/// The tarball is streamed into a temporary file inside the release
/// workspace and only renamed to `<tag>.tar.gz` once complete, so an
/// interrupted download never leaves a truncated archive under the final
/// name. The extraction directory is emptied before unpacking. Re-running
/// a release therefore overwrites instead of accumulating.
///
/// `file://` URLs are copied from the local filesystem.
pub struct HttpArtifactStore {
    client: Client,
    token: Option<String>,
    keep_artifacts: bool,
}

impl HttpArtifactStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // tarballs can be large; only the connect phase is bounded
            client: build_client(None)?,
            token: None,
            keep_artifacts: false,
        })
    }

    /// Bearer token sent with GitHub tarball requests (private repositories)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Leaves release workspaces on disk after the run
    pub fn with_keep_artifacts(mut self, keep_artifacts: bool) -> Self {
        self.keep_artifacts = keep_artifacts;
        self
    }

    fn download(&self, url: &str, workspace: &Path, tarball_path: &Path) -> Result<()> {
        let download_error = |details: String| -> anyhow::Error {
            AuditError::DownloadFailed {
                url: url.to_string(),
                details,
            }
            .into()
        };

        let mut staging =
            NamedTempFile::new_in(workspace).map_err(|e| download_error(e.to_string()))?;

        if let Some(local) = url.strip_prefix("file://") {
            let local = Path::new(local);
            validate_regular_file(local, "release tarball")
                .map_err(|e| download_error(e.to_string()))?;
            let mut source = File::open(local).map_err(|e| download_error(e.to_string()))?;
            io::copy(&mut source, &mut staging).map_err(|e| download_error(e.to_string()))?;
        } else {
            let mut request = self.client.get(url);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
            let mut response = request
                .send()
                .map_err(|e| download_error(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(download_error(format!("HTTP status {}", status)));
            }
            let bytes = response
                .copy_to(&mut staging)
                .map_err(|e| download_error(e.to_string()))?;
            tracing::debug!(url, bytes, "tarball downloaded");
        }

        staging
            .persist(tarball_path)
            .map_err(|e| download_error(e.to_string()))?;
        Ok(())
    }

    fn extract(&self, tarball_path: &Path, source_dir: &Path) -> Result<()> {
        let extraction_error = |details: String| -> anyhow::Error {
            AuditError::ExtractionFailed {
                path: tarball_path.to_path_buf(),
                details,
            }
            .into()
        };

        if source_dir.exists() {
            fs::remove_dir_all(source_dir).map_err(|e| extraction_error(e.to_string()))?;
        }
        fs::create_dir_all(source_dir).map_err(|e| extraction_error(e.to_string()))?;

        let file = File::open(tarball_path).map_err(|e| extraction_error(e.to_string()))?;
        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        archive.set_preserve_permissions(false);
        archive
            .unpack(source_dir)
            .map_err(|e| extraction_error(e.to_string()))?;
        Ok(())
    }
}

impl ArtifactStore for HttpArtifactStore {
    fn fetch_and_extract(&self, release: &Release, destination: &Path) -> Result<ExtractedArtifact> {
        ensure_directory(destination)?;
        let source_dir: PathBuf = destination.join(SOURCE_DIR);

        // Owns the workspace from here on: an early return removes it
        let artifact = ExtractedArtifact::new(
            release.tag().to_string(),
            destination.to_path_buf(),
            source_dir.clone(),
            self.keep_artifacts,
        );

        let tarball_path = destination.join(format!("{}.tar.gz", release.file_stem()));
        self.download(release.tarball_url(), destination, &tarball_path)?;
        self.extract(&tarball_path, &source_dir)?;

        tracing::debug!(
            release = release.tag(),
            dir = %source_dir.display(),
            "release extracted"
        );
        Ok(artifact)
    }
}
