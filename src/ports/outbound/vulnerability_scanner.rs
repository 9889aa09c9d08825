use crate::release_audit::domain::{SbomDocument, ScanMatch};
use crate::shared::Result;

/// VulnerabilityScanner port matching an SBOM against known vulnerabilities
pub trait VulnerabilityScanner {
    /// Scans the SBOM and returns the matches in scanner order
    ///
    /// # Errors
    /// Returns `AuditError::ToolFailed` when the scanner exits unsuccessfully
    /// and `AuditError::MalformedToolOutput` when its report cannot be parsed.
    fn scan(&self, sbom: &SbomDocument) -> Result<Vec<ScanMatch>>;
}
