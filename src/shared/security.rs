use crate::shared::error::AuditError;
use crate::shared::Result;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Maximum size of any JSON document read back from disk (256 MB).
/// Scanner reports for large monorepos are big, but never this big.
pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Maximum length of a sanitized path component
const MAX_COMPONENT_LENGTH: usize = 128;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        return Err(AuditError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Point the tool at the real directory instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AuditError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a regular file into a string after the symlink and size checks
pub fn read_bounded_file(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;
    fs::read_to_string(path).map_err(|e| {
        AuditError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Creates `dir` (and parents) if needed and rejects it if it is a symlink
/// or an existing non-directory.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() {
        validate_not_symlink(dir, "write")?;
        if !dir.is_dir() {
            return Err(AuditError::InvalidPath {
                path: dir.to_path_buf(),
                reason: "Not a directory".to_string(),
            }
            .into());
        }
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| {
        AuditError::InvalidPath {
            path: dir.to_path_buf(),
            reason: format!("Failed to create directory: {}", e),
        }
        .into()
    })
}

/// Turns an untrusted name (a release tag, usually) into a single safe path
/// component: no separators, no leading dot, bounded length.
pub fn sanitize_path_component(raw: &str) -> String {
    let mut sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_COMPONENT_LENGTH)
        .collect();

    if sanitized.is_empty() || sanitized.starts_with('.') {
        sanitized.insert(0, '_');
    }

    sanitized
}

/// Collision-free file stem for a release tag.
///
/// Tags that are already safe path components are used as-is. Any tag that
/// sanitizing had to alter gets a digest of the raw tag appended, so
/// `release/1.0` and `release_1.0` never share a stem.
pub fn release_file_stem(tag: &str) -> String {
    let sanitized = sanitize_path_component(tag);
    if sanitized == tag {
        return sanitized;
    }
    let digest = format!("{:x}", Sha256::digest(tag.as_bytes()));
    format!("{}-{}", sanitized, &digest[..12])
}
