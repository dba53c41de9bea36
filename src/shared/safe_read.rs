use crate::shared::error::BomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum artifact size read into memory (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size of small text files such as pkg-config metadata (1 MB)
pub const MAX_TEXT_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path resolves to a regular file.
///
/// Symbolic links are followed: shared libraries are routinely installed as
/// version symlinks (`libpng.so -> libpng.so.1.2.3`).
///
/// # Errors
/// Returns an error if the path doesn't exist or is not a regular file
pub fn validate_regular_file(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| BomError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a whole file after checking its type and size.
pub fn read_bytes_bounded(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let size = validate_regular_file(path)?;
    validate_file_size(size, path, max_size)?;

    fs::read(path).map_err(|e| {
        BomError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Reads a text file, replacing invalid UTF-8 sequences.
pub fn read_text_bounded(path: &Path, max_size: u64) -> Result<String> {
    let bytes = read_bytes_bounded(path, max_size)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("libz.so.1");
        fs::write(&file_path, "test").unwrap();

        assert_eq!(validate_regular_file(&file_path).unwrap(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_regular_file_follows_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("libz.so.1.2.11");
        let link = temp_dir.path().join("libz.so");
        fs::write(&real, "abc").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert_eq!(validate_regular_file(&link).unwrap(), 3);
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_missing() {
        let result = validate_regular_file(&PathBuf::from("/nonexistent/libnothing.so"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/libbig.so");
        let result = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_read_text_bounded_rejects_large_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.pc");
        fs::write(&file_path, "Name: big\n").unwrap();

        assert!(read_text_bounded(&file_path, 4).is_err());
        assert_eq!(
            read_text_bounded(&file_path, MAX_TEXT_FILE_SIZE).unwrap(),
            "Name: big\n"
        );
    }
}
