//! ZIP archive expansion.
//!
//! An archive in an upload batch is replaced by the files it contains, so a
//! whole folder can be labelled from a single selection.

use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use super::{UploadError, UploadFile};

/// Check if a file is a ZIP archive, by declared type or extension.
pub fn is_zip_file(name: &str, media_type: &str) -> bool {
    let media_type = media_type.to_lowercase();
    media_type == "application/zip"
        || media_type == "application/x-zip-compressed"
        || name.to_lowercase().ends_with(".zip")
}

/// Largest buffer reserved up front for an entry; the declared size in the
/// archive header is not trusted beyond this.
const MAX_ENTRY_RESERVE: u64 = 16 * 1024 * 1024;

/// Initial buffer capacity for an entry declaring `declared` bytes.
fn entry_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_ENTRY_RESERVE)).unwrap_or(0)
}

/// Skip hidden files and macOS metadata.
fn is_visible_entry(name: &str) -> bool {
    let lower = name.to_lowercase();
    !(lower.contains("__macosx") || lower.contains("/.") || lower.starts_with('.'))
}

/// Extract every visible file from an archive reader, sorted by name.
///
/// Works with both in-memory data (`Cursor<&[u8]>`) and files
/// (`std::fs::File`).
pub(super) fn extract_uploads_from_archive<R: Read + Seek>(
    reader: R,
    archive_name: &str,
) -> Result<Vec<UploadFile>, UploadError> {
    let mut archive =
        ZipArchive::new(reader).map_err(|e| UploadError::archive(archive_name, e.to_string()))?;

    let mut files = Vec::new();
    let entry_count = archive.len();

    log::debug!("ZIP '{}' contains {} entries", archive_name, entry_count);

    for i in 0..entry_count {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| UploadError::archive(archive_name, format!("entry {}: {}", i, e)))?;

        let name = entry.name().to_string();

        if entry.is_dir() || !is_visible_entry(&name) {
            log::trace!("Skipping ZIP entry: {}", name);
            continue;
        }

        let mut bytes = Vec::with_capacity(entry_capacity(entry.size()));
        entry.read_to_end(&mut bytes)?;

        log::trace!("Extracted '{}' ({} bytes)", name, bytes.len());
        files.push(UploadFile::from_name(name, bytes));
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    log::info!("Extracted {} files from ZIP '{}'", files.len(), archive_name);

    Ok(files)
}

/// Extract every visible file from an archive held in memory.
pub fn extract_uploads_from_zip_bytes(
    zip_data: &[u8],
    zip_name: &str,
) -> Result<Vec<UploadFile>, UploadError> {
    extract_uploads_from_archive(Cursor::new(zip_data), zip_name)
}

/// Replace archives in a batch with their contents.
///
/// An unreadable archive is dropped with a warning.
pub fn expand_archives(files: Vec<UploadFile>) -> Vec<UploadFile> {
    let mut expanded = Vec::with_capacity(files.len());
    for file in files {
        if !is_zip_file(&file.name, &file.media_type) {
            expanded.push(file);
            continue;
        }
        match extract_uploads_from_zip_bytes(&file.bytes, &file.name) {
            Ok(entries) => expanded.extend(entries),
            Err(e) => log::warn!("Skipping archive: {}", e),
        }
    }
    expanded
}
