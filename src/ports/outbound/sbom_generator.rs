use crate::release_audit::domain::{ExtractedArtifact, SbomDocument};
use crate::shared::Result;

/// SbomGenerator port producing a bill of materials for an extracted tree
pub trait SbomGenerator {
    /// Generates an SBOM for the artifact's source directory
    ///
    /// The returned document is addressed by the artifact's release tag.
    ///
    /// # Errors
    /// Returns `AuditError::ToolFailed` when the generator exits unsuccessfully
    /// and `AuditError::MalformedToolOutput` when its output is not a document.
    fn generate(&self, artifact: &ExtractedArtifact) -> Result<SbomDocument>;
}
