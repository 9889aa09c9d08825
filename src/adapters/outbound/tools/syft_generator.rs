use super::command::{read_json_output, run_to_file};
use crate::ports::outbound::SbomGenerator;
use crate::release_audit::domain::{ExtractedArtifact, SbomDocument};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::ffi::OsStr;
use std::path::PathBuf;

/// SyftSbomGenerator adapter running `syft <dir> -o json`
///
/// The SBOM lands next to the extracted tree as `<tag>.sbom.json`.
pub struct SyftSbomGenerator {
    program: PathBuf,
}

impl SyftSbomGenerator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SyftSbomGenerator {
    fn default() -> Self {
        Self::new("syft")
    }
}

impl SbomGenerator for SyftSbomGenerator {
    fn generate(&self, artifact: &ExtractedArtifact) -> Result<SbomDocument> {
        let output = artifact.output_path("sbom.json");
        let args = [
            artifact.source_dir().as_os_str(),
            OsStr::new("-o"),
            OsStr::new("json"),
        ];
        run_to_file("syft", &self.program, args, &output)?;

        let document: serde_json::Value = read_json_output("syft", &output)?;
        if !document.is_object() {
            return Err(AuditError::MalformedToolOutput {
                tool: "syft".to_string(),
                path: output,
                details: "expected a JSON object".to_string(),
            }
            .into());
        }

        tracing::debug!(
            release = artifact.release_tag(),
            sbom = %output.display(),
            "SBOM generated"
        );
        Ok(SbomDocument::new(artifact.release_tag().to_string(), output))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake_tool(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-syft");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn artifact(temp: &TempDir) -> ExtractedArtifact {
        let workspace = temp.path().join("v1.0.0");
        fs::create_dir_all(workspace.join("source")).unwrap();
        ExtractedArtifact::new(
            "v1.0.0".to_string(),
            workspace.clone(),
            workspace.join("source"),
            true,
        )
    }

    #[test]
    fn test_generate_writes_release_scoped_sbom() {
        let temp = TempDir::new().unwrap();
        let syft = fake_tool(temp.path(), r#"echo "{\"artifacts\": [], \"source\": {\"target\": \"$1\"}}""#);
        let artifact = artifact(&temp);

        let sbom = SyftSbomGenerator::new(syft).generate(&artifact).unwrap();

        assert_eq!(sbom.release_tag(), "v1.0.0");
        assert_eq!(sbom.path(), artifact.workspace_dir().join("v1.0.0.sbom.json"));
        let content = fs::read_to_string(sbom.path()).unwrap();
        assert!(content.contains("source"));
    }

    #[test]
    fn test_failing_syft_aborts() {
        let temp = TempDir::new().unwrap();
        let syft = fake_tool(temp.path(), "echo 'unable to detect source' >&2\nexit 1");

        let err = SyftSbomGenerator::new(syft)
            .generate(&artifact(&temp))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::ToolFailed { .. })
        ));
    }

    #[test]
    fn test_non_object_output_is_malformed() {
        let temp = TempDir::new().unwrap();
        let syft = fake_tool(temp.path(), "echo '[]'");

        let err = SyftSbomGenerator::new(syft)
            .generate(&artifact(&temp))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::MalformedToolOutput { .. })
        ));
    }
}
