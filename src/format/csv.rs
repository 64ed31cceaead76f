//! CSV export of image labels.
//!
//! One header row followed by one row per image:
//!
//! ```text
//! image_name,category,subcategory,subsubcategory,json_format
//! ```
//!
//! `json_format` repeats the label fields as compact JSON. Fields containing
//! a comma, quote or line break are quoted with inner quotes doubled, so
//! every row parses back into the same number of columns. Rows are joined
//! with `\n` and there is no trailing newline.

use std::borrow::Cow;

use serde::Serialize;

use super::error::FormatError;
use crate::constants::{CSV_MEDIA_TYPE, EXPORT_FILENAME};
use crate::model::{ImageRecord, LabelDepth, Labels};

/// A rendered CSV document ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested file name
    pub filename: String,
    /// Media type for downloads
    pub media_type: String,
    /// CSV text
    pub contents: String,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

impl CsvExport {
    /// Write the export into `dir` under its file name.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn write_to_dir(&self, dir: &std::path::Path) -> Result<std::path::PathBuf, FormatError> {
        if dir.exists() && !dir.is_dir() {
            return Err(FormatError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.contents)?;
        log::info!("Exported {} rows to {:?}", self.rows, path);
        Ok(path)
    }
}

/// Label fields in `json_format` for two-level labelling.
#[derive(Serialize)]
struct TwoLevelJson<'a> {
    category: &'a str,
    subcategory: &'a str,
}

/// Column names for the given depth.
pub fn header(depth: LabelDepth) -> Vec<&'static str> {
    let mut columns = vec!["image_name", "category", "subcategory"];
    if depth.has_subsubcategory() {
        columns.push("subsubcategory");
    }
    columns.push("json_format");
    columns
}

/// Compact JSON for one record's labels.
pub fn labels_json(labels: &Labels, depth: LabelDepth) -> Result<String, serde_json::Error> {
    if depth.has_subsubcategory() {
        serde_json::to_string(labels)
    } else {
        serde_json::to_string(&TwoLevelJson {
            category: &labels.category,
            subcategory: &labels.subcategory,
        })
    }
}

/// Quote a field if it would otherwise break the row.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn join_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the records as CSV.
pub fn export_csv(records: &[ImageRecord], depth: LabelDepth) -> Result<CsvExport, FormatError> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header(depth).join(","));

    for record in records {
        let labels = record.labels.normalized(depth);
        let json = labels_json(&labels, depth)?;

        let mut fields = vec![
            record.name.as_str(),
            labels.category.as_str(),
            labels.subcategory.as_str(),
        ];
        if depth.has_subsubcategory() {
            fields.push(labels.subsubcategory.as_str());
        }
        fields.push(json.as_str());

        lines.push(join_row(fields));
    }

    Ok(CsvExport {
        filename: EXPORT_FILENAME.to_string(),
        media_type: CSV_MEDIA_TYPE.to_string(),
        contents: lines.join("\n"),
        rows: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse_csv;

    fn record(name: &str, labels: Labels) -> ImageRecord {
        let mut record = ImageRecord::new(name, "image/png", String::new());
        record.labels = labels;
        record
    }

    #[test]
    fn test_header() {
        assert_eq!(
            header(LabelDepth::Three).join(","),
            "image_name,category,subcategory,subsubcategory,json_format"
        );
        assert_eq!(
            header(LabelDepth::Two).join(","),
            "image_name,category,subcategory,json_format"
        );
    }

    #[test]
    fn test_two_images_one_unlabelled() {
        let records = vec![
            record("one.png", Labels::new("Action", "Shooter", "FPS")),
            record("two.png", Labels::default()),
        ];
        let export = export_csv(&records, LabelDepth::Three).unwrap();
        assert_eq!(export.filename, "image_labels.csv");
        assert_eq!(export.rows, 2);
        assert!(!export.contents.ends_with('\n'));

        let rows = parse_csv(&export.contents);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            vec![
                "one.png",
                "Action",
                "Shooter",
                "FPS",
                r#"{"category":"Action","subcategory":"Shooter","subsubcategory":"FPS"}"#
            ]
        );
        assert_eq!(
            rows[2],
            vec![
                "two.png",
                "",
                "",
                "",
                r#"{"category":"","subcategory":"","subsubcategory":""}"#
            ]
        );
    }

    #[test]
    fn test_commas_and_quotes_are_escaped() {
        let records = vec![record(
            "a, b \"c\".png",
            Labels::new("Jeux vidéo, console", "", ""),
        )];
        let export = export_csv(&records, LabelDepth::Three).unwrap();
        let line = export.contents.lines().nth(1).unwrap();
        assert!(line.starts_with(r#""a, b ""c"".png","Jeux vidéo, console","#));

        let rows = parse_csv(&export.contents);
        assert_eq!(rows[1].len(), 5);
        assert_eq!(rows[1][0], "a, b \"c\".png");
        assert_eq!(rows[1][1], "Jeux vidéo, console");
    }

    #[test]
    fn test_two_level_export() {
        let records = vec![record("one.png", Labels::new("Action", "Shooter", "FPS"))];
        let export = export_csv(&records, LabelDepth::Two).unwrap();
        let rows = parse_csv(&export.contents);
        assert_eq!(
            rows[1],
            vec![
                "one.png",
                "Action",
                "Shooter",
                r#"{"category":"Action","subcategory":"Shooter"}"#
            ]
        );
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_field(""), "");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_csv(&[record("x.png", Labels::default())], LabelDepth::Three).unwrap();
        let path = export.write_to_dir(&dir.path().join("out")).unwrap();
        assert!(path.ends_with("out/image_labels.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.contents);
    }
}
