use super::command::{read_json_output, run_to_file};
use crate::ports::outbound::VulnerabilityScanner;
use crate::release_audit::domain::{SbomDocument, ScanMatch};
use crate::shared::security::release_file_stem;
use crate::shared::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// GrypeScanner adapter running `grype sbom:<file> -o json`
///
/// The raw report is kept beside the SBOM as `<tag>.grype.json`. Matches are
/// returned in report order.
pub struct GrypeScanner {
    program: PathBuf,
}

impl GrypeScanner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GrypeScanner {
    fn default() -> Self {
        Self::new("grype")
    }
}

impl VulnerabilityScanner for GrypeScanner {
    fn scan(&self, sbom: &SbomDocument) -> Result<Vec<ScanMatch>> {
        let output = sbom.path().with_file_name(format!(
            "{}.grype.json",
            release_file_stem(sbom.release_tag())
        ));
        let target = format!("sbom:{}", sbom.path().display());
        run_to_file("grype", &self.program, [target.as_str(), "-o", "json"], &output)?;

        let report: GrypeReport = read_json_output("grype", &output)?;
        let matches: Vec<ScanMatch> = report.matches.into_iter().map(ScanMatch::from).collect();

        tracing::debug!(
            release = sbom.release_tag(),
            matches = matches.len(),
            "scan complete"
        );
        Ok(matches)
    }
}

// Grype JSON report structures (only the fields the aggregation reads)

#[derive(Debug, Deserialize)]
struct GrypeReport {
    #[serde(default)]
    matches: Vec<GrypeMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeMatch {
    #[serde(default)]
    artifact: GrypeArtifact,
    #[serde(default)]
    vulnerability: GrypeVulnerability,
    #[serde(default)]
    related_vulnerabilities: Vec<GrypeRelatedVulnerability>,
}

#[derive(Debug, Default, Deserialize)]
struct GrypeArtifact {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Default, Deserialize)]
struct GrypeVulnerability {
    #[serde(default)]
    urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GrypeRelatedVulnerability {
    #[serde(default)]
    id: String,
}

impl From<GrypeMatch> for ScanMatch {
    fn from(m: GrypeMatch) -> Self {
        ScanMatch::new(
            m.artifact.name,
            m.artifact.version,
            m.vulnerability.urls,
            m.related_vulnerabilities.into_iter().map(|r| r.id).collect(),
        )
    }
}
