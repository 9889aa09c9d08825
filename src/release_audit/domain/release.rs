use crate::shared::security::release_file_stem;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum length for a release tag (security limit)
const MAX_TAG_LENGTH: usize = 255;

/// Release value object: one tagged, published version of the audited repository.
///
/// The serialized form matches the release snapshot written to `releases.json`
/// (`tag_name`, `tarball_url`, `prerelease`, `published_at`), which is also the
/// shape GitHub's release listing returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(rename = "tag_name")]
    tag: String,
    tarball_url: String,
    #[serde(rename = "prerelease", default)]
    is_prerelease: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    published_at: Option<DateTime<Utc>>,
}

impl Release {
    pub fn new(
        tag: String,
        tarball_url: String,
        is_prerelease: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let release = Self {
            tag,
            tarball_url,
            is_prerelease,
            published_at,
        };
        release.validate()?;
        Ok(release)
    }

    /// Checks the invariants a deserialized release must also satisfy
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            anyhow::bail!("Release tag cannot be empty");
        }
        if self.tag.len() > MAX_TAG_LENGTH {
            anyhow::bail!(
                "Release tag is too long ({} bytes). Maximum allowed: {} bytes",
                self.tag.len(),
                MAX_TAG_LENGTH
            );
        }
        if self.tarball_url.trim().is_empty() {
            anyhow::bail!("Release {} has no tarball URL", self.tag);
        }
        Ok(())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn tarball_url(&self) -> &str {
        &self.tarball_url
    }

    pub fn is_prerelease(&self) -> bool {
        self.is_prerelease
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Filesystem-safe stem derived from the tag, used for every
    /// release-scoped file and directory name. Distinct tags get distinct stems.
    pub fn file_stem(&self) -> String {
        release_file_stem(&self.tag)
    }
}

/// Accepts RFC 3339 timestamps; anything else ("N/A", garbage, null) becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
