use crate::application::dto::AuditSummary;
use crate::ports::outbound::AuditResultSink;
use crate::release_audit::domain::{EnrichedVulnerability, Release, VulnerabilityRecord};
use crate::shared::error::AuditError;
use crate::shared::security::{ensure_directory, validate_not_symlink};
use crate::shared::Result;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const RELEASES_FILE: &str = "releases.json";
pub const SUMMARY_FILE: &str = "audit-summary.json";

/// JsonResultWriter adapter persisting audit results as pretty-printed JSON
///
/// Files written into the output directory:
/// - `releases.json`: the release list the run consumed (replayable snapshot)
/// - `<tag>.cve_analysis.json`: the aggregated records of one release
/// - `<tag>.cve_enriched.json`: its enriched form, when enrichment ran
/// - `audit-summary.json`: per-release outcomes of the run
///
/// Every file is written to a temporary sibling and renamed into place.
pub struct JsonResultWriter {
    output_dir: PathBuf,
}

impl JsonResultWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn analysis_path(&self, release: &Release) -> PathBuf {
        self.output_dir
            .join(format!("{}.cve_analysis.json", release.file_stem()))
    }

    pub fn enriched_path(&self, release: &Release) -> PathBuf {
        self.output_dir
            .join(format!("{}.cve_enriched.json", release.file_stem()))
    }

    /// Serializes `value` to `path`, replacing any previous file atomically
    pub fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let write_error = |details: String| -> anyhow::Error {
            AuditError::FileWriteError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        let parent = match path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        ensure_directory(parent)?;
        if path.exists() {
            validate_not_symlink(path, "write")?;
        }

        let json = serde_json::to_string_pretty(value).map_err(|e| write_error(e.to_string()))?;
        let mut staging = NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
        staging
            .write_all(json.as_bytes())
            .and_then(|_| staging.write_all(b"\n"))
            .map_err(|e| write_error(e.to_string()))?;
        staging
            .persist(path)
            .map_err(|e| write_error(e.to_string()))?;
        Ok(())
    }
}

impl AuditResultSink for JsonResultWriter {
    fn persist_releases(&self, releases: &[Release]) -> Result<()> {
        Self::write_document(&self.output_dir.join(RELEASES_FILE), releases)
    }

    fn persist_release(
        &self,
        release: &Release,
        records: &[VulnerabilityRecord],
        enriched: Option<&[EnrichedVulnerability]>,
    ) -> Result<()> {
        let analysis = self.analysis_path(release);
        Self::write_document(&analysis, records)?;
        tracing::debug!(release = release.tag(), path = %analysis.display(), "records written");

        if let Some(enriched) = enriched {
            Self::write_document(&self.enriched_path(release), enriched)?;
        }
        Ok(())
    }

    fn persist_summary(&self, summary: &AuditSummary) -> Result<()> {
        Self::write_document(&self.output_dir.join(SUMMARY_FILE), summary)
    }
}
