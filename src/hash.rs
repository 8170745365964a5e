//! BLAKE3 hashing utilities for install-artifact comparison

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{BotstrapError, Result};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a file
///
/// The digest only decides whether two local artifacts differ; it is not a
/// security boundary. Deterministic across runs on identical bytes.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| BotstrapError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| BotstrapError::FileReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.txt");
        std::fs::write(&file_path, "test content").unwrap();

        let hash = hash_file(&file_path).unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
    }

    #[test]
    fn test_hash_file_not_found() {
        let result = hash_file(Path::new("/nonexistent/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_file_deterministic() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("unit.service");
        std::fs::write(&file_path, "[Unit]\nDescription=test\n").unwrap();

        assert_eq!(hash_file(&file_path).unwrap(), hash_file(&file_path).unwrap());
    }

    #[test]
    fn test_hash_file_differs_on_content() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.conf");
        let b = temp.path().join("b.conf");
        std::fs::write(&a, "LANGUAGE=en\n").unwrap();
        std::fs::write(&b, "LANGUAGE=ar\n").unwrap();

        assert_ne!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }
}
