use release_cve_audit::prelude::*;
use release_cve_audit::shared::error::AuditError;

/// Mock ReleaseFeed serving a fixed release list
pub struct MockReleaseFeed {
    pub releases: Vec<Release>,
    pub should_fail: bool,
}

impl MockReleaseFeed {
    pub fn new(releases: Vec<Release>) -> Self {
        Self {
            releases,
            should_fail: false,
        }
    }

    /// Builds stable releases from tags, tarball URLs derived from the tag
    pub fn with_tags(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(|tag| release(tag, false)).collect())
    }

    pub fn with_failure() -> Self {
        Self {
            releases: Vec::new(),
            should_fail: true,
        }
    }
}

pub fn release(tag: &str, prerelease: bool) -> Release {
    Release::new(
        tag.to_string(),
        format!("https://example.com/octo/widgets/{}.tar.gz", tag),
        prerelease,
        None,
    )
    .unwrap()
}

impl ReleaseFeed for MockReleaseFeed {
    fn source(&self) -> String {
        "octo/widgets".to_string()
    }

    fn fetch_releases(&self) -> Result<Vec<Release>> {
        if self.should_fail {
            return Err(AuditError::ReleaseFeedError {
                repository: "octo/widgets".to_string(),
                details: "HTTP status 404".to_string(),
            }
            .into());
        }
        Ok(self.releases.clone())
    }
}
