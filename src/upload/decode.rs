//! Decoding uploaded files into displayable records.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::{UploadError, UploadFile};
use crate::model::{ImageHandle, ImageRecord};

/// Build a `data:` URL for the given bytes.
pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// Read the pixel dimensions from an image header without decoding pixels.
///
/// Returns None for formats the decoder does not know (e.g. SVG) or for
/// corrupt headers; the record is still usable without dimensions.
pub fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    reader.format()?;
    reader.into_dimensions().ok()
}

/// Turn one uploaded file into an unlabelled record.
pub fn decode_file(file: UploadFile) -> Result<ImageRecord, UploadError> {
    let handle = ImageHandle::new(file.bytes);
    if handle.is_empty() {
        return Err(UploadError::decode(file.name, "file is empty"));
    }

    let url = data_url(&file.media_type, handle.bytes());
    let dimensions = probe_dimensions(handle.bytes());
    let record = ImageRecord::new(file.name, file.media_type, url).with_handle(handle);

    Ok(match dimensions {
        Some((w, h)) => {
            log::trace!("Decoded '{}' ({}x{})", record.name, w, h);
            record.with_dimensions(w, h)
        }
        None => {
            log::debug!("Decoded '{}' (dimensions unknown)", record.name);
            record
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tiny_png;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(data_url("image/gif", b""), "data:image/gif;base64,");
    }

    #[test]
    fn test_decode_png() {
        let bytes = tiny_png();
        let len = bytes.len();
        let record = decode_file(UploadFile::new("dot.png", "image/png", bytes)).unwrap();
        assert_eq!(record.name, "dot.png");
        assert_eq!(record.media_type, "image/png");
        assert_eq!(record.dimensions, Some((2, 3)));
        assert_eq!(record.size, len as u64);
        assert!(record.url.starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(record.handle.as_ref().unwrap().bytes(), tiny_png().as_slice());
        assert!(!record.is_labelled());
    }

    #[test]
    fn test_unknown_format_has_no_dimensions() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#.to_vec();
        let record = decode_file(UploadFile::new("a.svg", "image/svg+xml", svg)).unwrap();
        assert!(record.dimensions.is_none());
        assert!(record.url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_empty_file_fails() {
        let err = decode_file(UploadFile::new("e.png", "image/png", Vec::new())).unwrap_err();
        assert!(matches!(err, UploadError::Decode { .. }));
    }

    #[test]
    fn test_probe_rejects_garbage() {
        assert!(probe_dimensions(&[0, 1, 2, 3, 4, 5, 6, 7]).is_none());
    }
}
