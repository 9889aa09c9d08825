//! Configuration file support for release-cve-audit.
//!
//! Provides YAML-based configuration through `release-cve-audit.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::release_audit::policies::{AttributionMode, CvssPolicy};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "release-cve-audit.config.yml";

/// Top-level configuration file schema.
///
/// Every key is optional; command-line flags take precedence over values
/// found here. Secrets (`GITHUB_TOKEN`, `NVD_API_KEY`) are only read from
/// the environment.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub repository: Option<String>,
    pub releases_file: Option<PathBuf>,
    pub per_page: Option<u32>,
    pub skip_prereleases: Option<bool>,
    pub output_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub keep_artifacts: Option<bool>,
    pub enrich: Option<bool>,
    pub attribution_mode: Option<AttributionMode>,
    pub cvss_policy: Option<CvssPolicy>,
    pub max_attempts: Option<u32>,
    pub backoff_seconds: Option<u64>,
    pub syft_path: Option<PathBuf>,
    pub grype_path: Option<PathBuf>,
    pub nvd_api_url: Option<String>,
    pub github_api_url: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_attempts == Some(0) {
        bail!(
            "Invalid config: max_attempts must be at least 1.\n\n\
             💡 Hint: max_attempts is the total number of NVD requests per lookup, including the first."
        );
    }

    if let Some(per_page) = config.per_page {
        if !(1..=100).contains(&per_page) {
            bail!(
                "Invalid config: per_page must be between 1 and 100 (got {}).\n\n\
                 💡 Hint: The GitHub releases API returns at most 100 entries per page.",
                per_page
            );
        }
    }

    if let Some(ref repository) = config.repository {
        if !is_owner_name(repository) {
            bail!(
                "Invalid config: repository '{}' must be given as owner/name.\n\n\
                 💡 Hint: For example \"anchore/syft\".",
                repository
            );
        }
    }

    Ok(())
}

/// Returns true for `owner/name` with both parts non-empty and no further slash
pub fn is_owner_name(repository: &str) -> bool {
    match repository.trim().split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
repository: anchore/syft
per_page: 10
skip_prereleases: true
output_dir: reports
keep_artifacts: false
enrich: true
attribution_mode: all-attributions
cvss_policy: v31-then-v2
max_attempts: 5
backoff_seconds: 6
syft_path: /opt/bin/syft
nvd_api_url: http://localhost:8080/cves
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.repository.as_deref(), Some("anchore/syft"));
        assert_eq!(config.per_page, Some(10));
        assert_eq!(config.skip_prereleases, Some(true));
        assert_eq!(config.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(config.keep_artifacts, Some(false));
        assert_eq!(config.enrich, Some(true));
        assert_eq!(
            config.attribution_mode,
            Some(AttributionMode::AllAttributions)
        );
        assert_eq!(config.cvss_policy, Some(CvssPolicy::V31ThenV2));
        assert_eq!(config.max_attempts, Some(5));
        assert_eq!(config.backoff_seconds, Some(6));
        assert_eq!(config.syft_path, Some(PathBuf::from("/opt/bin/syft")));
        assert!(config.grype_path.is_none());
        assert_eq!(
            config.nvd_api_url.as_deref(),
            Some("http://localhost:8080/cves")
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            r#"
releases_file: releases.json
enrich: false
"#,
        )
        .unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        let config = config.unwrap();
        assert_eq!(config.releases_file, Some(PathBuf::from("releases.json")));
        assert_eq!(config.enrich, Some(false));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_attribution_mode_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "attribution_mode: first-wins\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_attempts: 0\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("max_attempts must be at least 1"));
    }

    #[test]
    fn test_per_page_out_of_range_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "per_page: 101\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("per_page must be between 1 and 100"));
    }

    #[test]
    fn test_repository_without_owner_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "repository: syft\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("must be given as owner/name"));
    }

    #[test]
    fn test_is_owner_name() {
        assert!(is_owner_name("anchore/grype"));
        assert!(!is_owner_name("anchore"));
        assert!(!is_owner_name("/grype"));
        assert!(!is_owner_name("anchore/"));
        assert!(!is_owner_name("a/b/c"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
enrich: true
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.repository.is_none());
        assert!(config.releases_file.is_none());
        assert!(config.attribution_mode.is_none());
        assert!(config.cvss_policy.is_none());
        assert!(config.max_attempts.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
