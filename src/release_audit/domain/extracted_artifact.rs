use crate::shared::security::release_file_stem;
use std::fs;
use std::path::{Path, PathBuf};

/// ExtractedArtifact - the release-scoped working directory holding an
/// extracted source tree.
///
/// Owns `workspace_dir`: the directory (tarball, extracted tree, SBOM and scan
/// report included) is removed when the artifact is dropped, unless it was
/// created with `keep` set. SBOM and scan outputs are placed inside the same
/// workspace through [`ExtractedArtifact::output_path`].
#[derive(Debug)]
pub struct ExtractedArtifact {
    release_tag: String,
    workspace_dir: PathBuf,
    source_dir: PathBuf,
    keep: bool,
}

impl ExtractedArtifact {
    pub fn new(release_tag: String, workspace_dir: PathBuf, source_dir: PathBuf, keep: bool) -> Self {
        Self {
            release_tag,
            workspace_dir,
            source_dir,
            keep,
        }
    }

    pub fn release_tag(&self) -> &str {
        &self.release_tag
    }

    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Release-scoped path inside the workspace, e.g. `<workspace>/v1.0.0.sbom.json`
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.workspace_dir.join(format!(
            "{}.{}",
            release_file_stem(&self.release_tag),
            suffix
        ))
    }
}

impl Drop for ExtractedArtifact {
    fn drop(&mut self) {
        if self.keep || !self.workspace_dir.exists() {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.workspace_dir) {
            tracing::warn!(
                "Failed to remove workspace {}: {}",
                self.workspace_dir.display(),
                e
            );
        }
    }
}

/// SBOMDocument - an SBOM produced for one release, addressed by its tag.
/// The document format belongs to the generator; only the path is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomDocument {
    release_tag: String,
    path: PathBuf,
}

impl SbomDocument {
    pub fn new(release_tag: String, path: PathBuf) -> Self {
        Self { release_tag, path }
    }

    pub fn release_tag(&self) -> &str {
        &self.release_tag
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
