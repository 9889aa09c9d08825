use crate::release_audit::domain::EnrichedVulnerability;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// NvdFeedReader port for the offline, file-based enrichment path
pub trait NvdFeedReader {
    /// Lists the feed files found in `dir`, sorted by name
    fn feed_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Parses one feed file into enriched records, in file order
    fn read_feed(&self, path: &Path) -> Result<Vec<EnrichedVulnerability>>;
}
