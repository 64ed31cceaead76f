//! Fixtures shared by unit tests.

use std::io::{Cursor, Write};

use image::{ImageFormat, Rgb, RgbImage};
use zip::write::SimpleFileOptions;

use crate::model::CategoryCatalog;
use crate::upload::UploadFile;

/// A valid 2x3 PNG.
pub fn tiny_png() -> Vec<u8> {
    let image = RgbImage::from_pixel(2, 3, Rgb([200, 40, 40]));
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png).unwrap();
    cursor.into_inner()
}

/// A ZIP archive holding the given entries.
pub fn tiny_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// An uploadable PNG file.
pub fn png_file(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", tiny_png())
}

/// The small game catalog used across the session tests.
pub fn game_catalog() -> CategoryCatalog {
    CategoryCatalog::from_seed_json(
        r#"{
            "Action": { "Shooter": ["FPS", "TPS"], "Plateforme": ["2D", "3D"] },
            "Sport": { "Course": ["Kart"] }
        }"#,
    )
    .unwrap()
}

/// Minimal RFC 4180 reader for checking exports.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => quoted = false,
            ('"', false) if field.is_empty() => quoted = true,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\n', false) => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            (c, _) => field.push(c),
        }
    }
    row.push(field);
    rows.push(row);
    rows
}
