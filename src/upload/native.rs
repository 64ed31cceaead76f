//! Reading upload batches from the filesystem (native only).

use std::path::{Path, PathBuf};

use super::{UploadError, UploadFile, media_type_for_name};

/// Read one file from disk, guessing its media type from the extension.
pub fn read_upload_file(path: &Path) -> Result<UploadFile, UploadError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type_for_name(&name);
    Ok(UploadFile::new(name, media_type, bytes))
}

/// Recursively collect file paths under a folder.
fn scan_folder_recursive(folder: &Path, paths: &mut Vec<PathBuf>) -> Result<(), UploadError> {
    for entry in std::fs::read_dir(folder)?.filter_map(|e| e.ok()) {
        let path = entry.path();

        if path.is_file() {
            paths.push(path);
        } else if path.is_dir() {
            if let Err(e) = scan_folder_recursive(&path, paths) {
                log::warn!("Failed to scan subdirectory {:?}: {}", path, e);
                // Continue scanning other directories
            }
        }
    }

    Ok(())
}

/// Build an upload batch from a list of paths (files and/or folders).
///
/// Files are taken as given; folders are scanned recursively and their files
/// sorted by path. Unreadable entries are skipped with a warning. Media-type
/// filtering happens later, like for files coming from a browser.
pub fn files_from_paths(paths: &[PathBuf]) -> Vec<UploadFile> {
    let mut files = Vec::new();

    for path in paths {
        let mut found = Vec::new();
        if path.is_dir() {
            if let Err(e) = scan_folder_recursive(path, &mut found) {
                log::warn!("Failed to scan folder {:?}: {}", path, e);
            }
            found.sort();
        } else {
            found.push(path.clone());
        }

        for file in found {
            match read_upload_file(&file) {
                Ok(upload) => files.push(upload),
                Err(e) => log::warn!("Failed to read {:?}: {}", file, e),
            }
        }
    }

    log::info!(
        "Collected {} files from {} paths",
        files.len(),
        paths.len()
    );

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tiny_png;

    #[test]
    fn test_files_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("b.png"), tiny_png()).unwrap();
        std::fs::write(sub.join("a.jpg"), b"jpeg-ish").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();

        let files = files_from_paths(&[dir.path().to_path_buf()]);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "notes.txt", "a.jpg"]);
        assert_eq!(files[2].media_type, "image/jpeg");
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_from_paths(&[dir.path().join("nope.png")]);
        assert!(files.is_empty());
    }
}
