use crate::ports::outbound::ReleaseFeed;
use crate::release_audit::domain::Release;
use crate::shared::error::AuditError;
use crate::shared::security::read_bounded_file;
use crate::shared::Result;
use std::path::PathBuf;

/// JsonFileReleaseFeed adapter replaying a release snapshot
///
/// Reads the same `[{tag_name, tarball_url, prerelease, published_at}]`
/// document every audit run writes to `releases.json`.
pub struct JsonFileReleaseFeed {
    path: PathBuf,
}

impl JsonFileReleaseFeed {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn feed_error(&self, details: String) -> anyhow::Error {
        AuditError::ReleaseFeedError {
            repository: self.path.display().to_string(),
            details,
        }
        .into()
    }
}

impl ReleaseFeed for JsonFileReleaseFeed {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_releases(&self) -> Result<Vec<Release>> {
        let content = read_bounded_file(&self.path, "release snapshot")
            .map_err(|e| self.feed_error(e.to_string()))?;
        let releases: Vec<Release> =
            serde_json::from_str(&content).map_err(|e| self.feed_error(e.to_string()))?;

        for release in &releases {
            release
                .validate()
                .map_err(|e| self.feed_error(e.to_string()))?;
        }
        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_snapshot_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("releases.json");
        fs::write(
            &path,
            r#"[
                {"tag_name": "v2", "tarball_url": "https://x/v2.tar.gz", "prerelease": false, "published_at": "2024-02-01T00:00:00Z"},
                {"tag_name": "v1", "tarball_url": "https://x/v1.tar.gz", "prerelease": true, "published_at": "N/A"}
            ]"#,
        )
        .unwrap();

        let releases = JsonFileReleaseFeed::new(path).fetch_releases().unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag(), "v2");
        assert!(releases[1].is_prerelease());
        assert!(releases[1].published_at().is_none());
    }

    #[test]
    fn test_missing_file_is_feed_error() {
        let temp = TempDir::new().unwrap();
        let feed = JsonFileReleaseFeed::new(temp.path().join("absent.json"));

        let err = feed.fetch_releases().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::ReleaseFeedError { .. })
        ));
    }

    #[test]
    fn test_release_without_tarball_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("releases.json");
        fs::write(&path, r#"[{"tag_name": "v1", "tarball_url": ""}]"#).unwrap();

        let err = JsonFileReleaseFeed::new(path).fetch_releases().unwrap_err();
        assert!(err.to_string().contains("no tarball URL"));
    }
}
