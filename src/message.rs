//! Application message types for the labeller.
//!
//! Every user action is represented as a [`Message`] in the Elm architecture
//! style. Front ends build messages (the CLI by parsing a line of text, the
//! browser binding by calling methods) and hand them to the session.

use std::fmt;
use std::path::PathBuf;

/// Messages that can be sent to update the labelling session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    // Upload
    /// Replace the collection with the files at these paths
    Upload(Vec<PathBuf>),

    // Navigation
    /// Save the current labels
    Save,
    /// Save, then go to the previous image
    Previous,
    /// Save, then go to the next image
    Next,

    // Selection
    /// Pick a category (empty clears)
    SelectCategory(String),
    /// Pick a subcategory (empty clears)
    SelectSubcategory(String),
    /// Pick a sub-subcategory (empty clears)
    SelectSubsubcategory(String),

    // Catalog
    /// Add a category
    AddCategory(String),
    /// Add a subcategory under the selected category
    AddSubcategory(String),
    /// Add a term under the selected subcategory
    AddLeaf(String),

    // View
    /// Zoom in one step
    ZoomIn,
    /// Zoom out one step
    ZoomOut,
    /// Reset zoom to 100%
    ResetZoom,

    // Output
    /// Write the CSV export, optionally into a given folder
    Export(Option<PathBuf>),
    /// Show the current image and selection
    Status,
    /// Show the options for each selector
    List,
    /// Show the command reference
    Help,
    /// Leave the program
    Quit,
}

/// Text command reference shown by `help`.
pub const HELP: &str = "\
Commands:
  upload <path>...     load image files, folders or zip archives
                       (quote paths containing spaces)
  next | n             save and go to the next image
  prev | p             save and go to the previous image
  save | s             save the current labels
  cat [value]          select a category (no value clears)
  sub [value]          select a subcategory
  leaf [value]         select a sub-subcategory
  add-cat <name>       add a category
  add-sub <name>       add a subcategory under the selected category
  add-leaf <term>      add a term under the selected subcategory
  zoom in|out|reset    change the preview zoom
  export [folder]      write image_labels.csv
  status               show the current image and selection
  list                 show the available options
  help                 show this text
  quit | q             leave";

/// Error for a line that is not a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

fn required(command: &str, arg: &str) -> Result<String, ParseError> {
    if arg.is_empty() {
        Err(ParseError::new(format!("'{}' needs a value", command)))
    } else {
        Ok(arg.to_string())
    }
}

/// Split an argument into paths. Whitespace separates paths except inside
/// double quotes, so `"My Pictures/a.png" b.png` is two paths.
fn split_paths(arg: &str) -> Result<Vec<PathBuf>, ParseError> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in arg.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(ParseError::new("unterminated quote in path"));
    }
    if pending {
        paths.push(PathBuf::from(current));
    }
    Ok(paths)
}

impl Message {
    /// Parse one line of text into a message.
    ///
    /// The first word is the command; the rest of the line, trimmed, is its
    /// argument, so values may contain spaces (`cat Jeu de rôle`).
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let message = match command.to_lowercase().as_str() {
            "" => return Err(ParseError::new("empty command")),
            "upload" | "open" => {
                let paths = split_paths(arg)?;
                if paths.is_empty() {
                    return Err(ParseError::new("'upload' needs at least one path"));
                }
                Message::Upload(paths)
            }
            "save" | "s" => Message::Save,
            "prev" | "previous" | "p" => Message::Previous,
            "next" | "n" => Message::Next,
            "cat" | "category" => Message::SelectCategory(arg.to_string()),
            "sub" | "subcategory" => Message::SelectSubcategory(arg.to_string()),
            "leaf" | "subsub" => Message::SelectSubsubcategory(arg.to_string()),
            "add-cat" => Message::AddCategory(required(command, arg)?),
            "add-sub" => Message::AddSubcategory(required(command, arg)?),
            "add-leaf" => Message::AddLeaf(required(command, arg)?),
            "zoom" => match arg {
                "in" | "+" => Message::ZoomIn,
                "out" | "-" => Message::ZoomOut,
                "reset" | "" => Message::ResetZoom,
                other => {
                    return Err(ParseError::new(format!(
                        "unknown zoom direction '{}' (in, out, reset)",
                        other
                    )));
                }
            },
            "export" => Message::Export((!arg.is_empty()).then(|| PathBuf::from(arg))),
            "status" => Message::Status,
            "list" | "ls" => Message::List,
            "help" | "?" => Message::Help,
            "quit" | "exit" | "q" => Message::Quit,
            other => {
                return Err(ParseError::new(format!(
                    "unknown command '{}', type 'help' for a list",
                    other
                )));
            }
        };

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(Message::parse("next"), Ok(Message::Next));
        assert_eq!(Message::parse("  N "), Ok(Message::Next));
        assert_eq!(Message::parse("prev"), Ok(Message::Previous));
        assert_eq!(Message::parse("save"), Ok(Message::Save));
        assert_eq!(Message::parse("q"), Ok(Message::Quit));
    }

    #[test]
    fn test_values_keep_spaces() {
        assert_eq!(
            Message::parse("cat Jeu de rôle"),
            Ok(Message::SelectCategory("Jeu de rôle".into()))
        );
        assert_eq!(
            Message::parse("add-sub  Beat them all "),
            Ok(Message::AddSubcategory("Beat them all".into()))
        );
    }

    #[test]
    fn test_select_without_value_clears() {
        assert_eq!(
            Message::parse("sub"),
            Ok(Message::SelectSubcategory(String::new()))
        );
    }

    #[test]
    fn test_add_requires_value() {
        assert!(Message::parse("add-cat").is_err());
        assert!(Message::parse("add-leaf   ").is_err());
    }

    #[test]
    fn test_zoom_and_export() {
        assert_eq!(Message::parse("zoom in"), Ok(Message::ZoomIn));
        assert_eq!(Message::parse("zoom -"), Ok(Message::ZoomOut));
        assert_eq!(Message::parse("zoom"), Ok(Message::ResetZoom));
        assert!(Message::parse("zoom sideways").is_err());
        assert_eq!(Message::parse("export"), Ok(Message::Export(None)));
        assert_eq!(
            Message::parse("export out"),
            Ok(Message::Export(Some(PathBuf::from("out"))))
        );
    }

    #[test]
    fn test_upload_paths() {
        assert_eq!(
            Message::parse("upload a.png shots"),
            Ok(Message::Upload(vec![
                PathBuf::from("a.png"),
                PathBuf::from("shots")
            ]))
        );
        assert!(Message::parse("upload").is_err());
    }

    #[test]
    fn test_upload_quoted_paths_keep_spaces() {
        assert_eq!(
            Message::parse(r#"upload "My Pictures/a b.png" c.png"#),
            Ok(Message::Upload(vec![
                PathBuf::from("My Pictures/a b.png"),
                PathBuf::from("c.png")
            ]))
        );
        assert_eq!(
            Message::parse(r#"upload "holiday shots""#),
            Ok(Message::Upload(vec![PathBuf::from("holiday shots")]))
        );
        assert!(Message::parse(r#"upload "unfinished"#).is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = Message::parse("dance").unwrap_err();
        assert!(err.to_string().contains("dance"));
        assert!(Message::parse("").is_err());
    }
}
