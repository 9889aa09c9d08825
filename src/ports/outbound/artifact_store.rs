use crate::release_audit::domain::{ExtractedArtifact, Release};
use crate::shared::Result;
use std::path::Path;

/// ArtifactStore port retrieving a release tarball and extracting it
pub trait ArtifactStore {
    /// Downloads the release tarball and extracts it below `destination`
    ///
    /// Re-invoking with the same destination overwrites earlier downloads and
    /// extractions instead of appending to them.
    ///
    /// # Arguments
    /// * `release` - Release whose tarball should be fetched
    /// * `destination` - Release-scoped workspace directory
    ///
    /// # Errors
    /// Returns `AuditError::DownloadFailed` for transport failures and
    /// non-success statuses, `AuditError::ExtractionFailed` when the archive
    /// cannot be unpacked.
    fn fetch_and_extract(&self, release: &Release, destination: &Path) -> Result<ExtractedArtifact>;
}
