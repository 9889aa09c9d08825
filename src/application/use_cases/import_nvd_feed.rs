use crate::application::dto::ImportResponse;
use crate::ports::outbound::{NvdFeedReader, ProgressReporter};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::path::Path;

/// ImportNvdFeedUseCase - batch enrichment from downloaded NVD feed files
///
/// Every feed file in the directory is read in name order. A file that
/// cannot be parsed is reported and skipped; the import only fails when the
/// directory holds no feed file at all.
pub struct ImportNvdFeedUseCase<FR, PR> {
    feed_reader: FR,
    progress_reporter: PR,
}

impl<FR: NvdFeedReader, PR: ProgressReporter> ImportNvdFeedUseCase<FR, PR> {
    pub fn new(feed_reader: FR, progress_reporter: PR) -> Self {
        Self {
            feed_reader,
            progress_reporter,
        }
    }

    pub fn execute(&self, dir: &Path) -> Result<ImportResponse> {
        let files = self.feed_reader.feed_files(dir)?;
        if files.is_empty() {
            return Err(AuditError::InvalidPath {
                path: dir.to_path_buf(),
                reason: "no NVD feed files (*nvdcve*.json) found".to_string(),
            }
            .into());
        }

        self.progress_reporter
            .report(&format!("📖 Importing {} NVD feed file(s)", files.len()));

        let mut response = ImportResponse::default();
        let total = files.len();
        for (index, path) in files.into_iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.progress_reporter
                .report_progress(index + 1, total, Some(&name));

            match self.feed_reader.read_feed(&path) {
                Ok(records) => {
                    tracing::debug!(file = %path.display(), records = records.len(), "feed file imported");
                    response.records.extend(records);
                    response.files_read.push(path);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), "skipping feed file: {:#}", e);
                    self.progress_reporter
                        .report_error(&format!("⚠️  Skipping {}: {}", name, e));
                    response.files_skipped.push((path, e.to_string()));
                }
            }
        }

        self.progress_reporter.report_completion(&format!(
            "Imported {} record(s) ({} with CVSS scoring) from {} file(s)",
            response.records.len(),
            response.scored_count(),
            response.files_read.len()
        ));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release_audit::domain::EnrichedVulnerability;
    use std::path::PathBuf;

    struct MockFeedReader {
        files: Vec<&'static str>,
    }

    impl NvdFeedReader for MockFeedReader {
        fn feed_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
            Ok(self.files.iter().map(|f| dir.join(f)).collect())
        }

        fn read_feed(&self, path: &Path) -> Result<Vec<EnrichedVulnerability>> {
            if path.to_string_lossy().contains("broken") {
                anyhow::bail!("expected value at line 1 column 1");
            }
            let stem = path.file_stem().unwrap().to_string_lossy().to_string();
            Ok(vec![EnrichedVulnerability::new(
                format!("CVE-{}", stem),
                None,
                None,
            )])
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[test]
    fn test_import_skips_broken_files() {
        let uc = ImportNvdFeedUseCase::new(
            MockFeedReader {
                files: vec!["nvdcve-2020.json", "nvdcve-broken.json", "nvdcve-2021.json"],
            },
            SilentReporter,
        );

        let response = uc.execute(Path::new("feeds")).unwrap();

        assert_eq!(response.records.len(), 2);
        assert_eq!(response.records[0].cve_id, "CVE-nvdcve-2020");
        assert_eq!(response.files_read.len(), 2);
        assert_eq!(response.files_skipped.len(), 1);
        assert!(response.files_skipped[0].1.contains("line 1"));
    }

    #[test]
    fn test_import_without_feed_files_fails() {
        let uc = ImportNvdFeedUseCase::new(MockFeedReader { files: vec![] }, SilentReporter);

        let err = uc.execute(Path::new("empty")).unwrap_err();
        assert!(err.to_string().contains("no NVD feed files"));
    }
}
