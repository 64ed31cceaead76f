//! Message handlers for the command-line front end.
//!
//! [`handle_message`] applies one [`Message`] to a [`LabelSession`] and
//! reports the result as text, keeping the read loop in `main` small.

use std::io::{self, Write};
use std::path::Path;

use crate::message::{HELP, Message};
use crate::model::LabelOption;
use crate::state::LabelSession;
use crate::store::SessionStore;
use crate::upload::files_from_paths;

/// What the read loop should do after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands
    Continue,
    /// Stop
    Quit,
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn write_options(
    out: &mut impl Write,
    title: &str,
    options: &[LabelOption],
    selected: &str,
) -> io::Result<()> {
    if options.is_empty() {
        return writeln!(out, "{}: (none)", title);
    }
    writeln!(out, "{}:", title)?;
    for option in options {
        let marker = if option.value == selected { '*' } else { ' ' };
        writeln!(out, " {} {}", marker, option.label)?;
    }
    Ok(())
}

/// Print the current image and the pending selection.
pub fn write_status<S: SessionStore>(
    session: &LabelSession<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let Some(record) = session.current() else {
        return writeln!(out, "No images loaded. Use 'upload <path>...'.");
    };

    write!(out, "[{}] {}", session.progress(), record.name)?;
    if let Some((width, height)) = record.dimensions {
        write!(out, " ({}x{})", width, height)?;
    }
    writeln!(out, " zoom {}%", session.view().zoom_percent())?;

    let selection = session.selection();
    write!(
        out,
        "  category: {}  subcategory: {}",
        or_none(selection.category()),
        or_none(selection.subcategory())
    )?;
    if session.depth().has_subsubcategory() {
        write!(out, "  subsubcategory: {}", or_none(selection.subsubcategory()))?;
    }
    writeln!(
        out,
        "\n  {} of {} images labelled",
        session.collection().labelled_count(),
        session.collection().len()
    )
}

/// Print the options for each selector.
pub fn write_options_list<S: SessionStore>(
    session: &LabelSession<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let selection = session.selection();
    write_options(
        out,
        "Categories",
        &session.category_options(),
        selection.category(),
    )?;
    if !selection.category().is_empty() {
        write_options(
            out,
            "Subcategories",
            &session.subcategory_options(),
            selection.subcategory(),
        )?;
    }
    if session.depth().has_subsubcategory() && !selection.subcategory().is_empty() {
        write_options(
            out,
            "Sub-subcategories",
            &session.subsubcategory_options(),
            selection.subsubcategory(),
        )?;
    }
    Ok(())
}

/// Apply one message to the session and describe what happened.
///
/// `export_dir` is used when an export message names no folder.
pub fn handle_message<S: SessionStore>(
    session: &mut LabelSession<S>,
    message: Message,
    out: &mut impl Write,
    export_dir: &Path,
) -> io::Result<Flow> {
    match message {
        Message::Upload(paths) => {
            let files = files_from_paths(&paths);
            match session.upload(files) {
                Some(summary) => {
                    writeln!(out, "Loaded {} images", summary.loaded)?;
                    if !summary.skipped.is_empty() {
                        writeln!(out, "Skipped {} non-image files", summary.skipped.len())?;
                    }
                    for error in &summary.failed {
                        writeln!(out, "  {}", error)?;
                    }
                    write_status(session, out)?;
                }
                None => writeln!(out, "No files found")?,
            }
        }
        Message::Save => {
            if session.save_current_labels() {
                writeln!(out, "Saved labels for image {}", session.progress())?;
            } else {
                writeln!(out, "No images loaded")?;
            }
        }
        Message::Previous => {
            if !session.previous() && !session.is_empty() {
                writeln!(out, "Already at the first image")?;
            }
            write_status(session, out)?;
        }
        Message::Next => {
            if !session.next() && !session.is_empty() {
                writeln!(out, "Already at the last image")?;
            }
            write_status(session, out)?;
        }
        Message::SelectCategory(value) => {
            session.select_category(&value);
            write_options_list(session, out)?;
        }
        Message::SelectSubcategory(value) => {
            if !session.select_subcategory(&value) && session.selection().category().is_empty() {
                writeln!(out, "Select a category first")?;
            }
            write_options_list(session, out)?;
        }
        Message::SelectSubsubcategory(value) => {
            if !session.depth().has_subsubcategory() {
                writeln!(out, "Two-level labelling has no sub-subcategory")?;
            } else if !session.select_subsubcategory(&value)
                && session.selection().subcategory().is_empty()
            {
                writeln!(out, "Select a subcategory first")?;
            }
            write_options_list(session, out)?;
        }
        Message::AddCategory(name) => {
            if session.add_category(&name) {
                writeln!(out, "Added category '{}'", name.trim())?;
            } else {
                writeln!(out, "Category '{}' already exists", name.trim())?;
            }
        }
        Message::AddSubcategory(name) => {
            let category = session.selection().category().to_string();
            if category.is_empty() {
                writeln!(out, "Select a category first")?;
            } else if session.add_subcategory(&name) {
                writeln!(out, "Added subcategory '{}' to {}", name.trim(), category)?;
            } else {
                writeln!(out, "Nothing added")?;
            }
        }
        Message::AddLeaf(term) => {
            if session.add_leaf(&term) {
                writeln!(
                    out,
                    "Added '{}' to {} / {}",
                    term.trim(),
                    session.selection().category(),
                    session.selection().subcategory()
                )?;
            } else {
                writeln!(out, "Nothing added")?;
            }
        }
        Message::ZoomIn => {
            session.zoom_in();
            writeln!(out, "Zoom {}%", session.view().zoom_percent())?;
        }
        Message::ZoomOut => {
            session.zoom_out();
            writeln!(out, "Zoom {}%", session.view().zoom_percent())?;
        }
        Message::ResetZoom => {
            session.reset_zoom();
            writeln!(out, "Zoom {}%", session.view().zoom_percent())?;
        }
        Message::Export(dir) => match session.export_csv() {
            Ok(Some(export)) => {
                let dir = dir.as_deref().unwrap_or(export_dir);
                match export.write_to_dir(dir) {
                    Ok(path) => writeln!(
                        out,
                        "Exported {} rows to {}",
                        export.rows,
                        path.display()
                    )?,
                    Err(e) => writeln!(out, "Export failed: {}", e)?,
                }
            }
            Ok(None) => writeln!(out, "No images to export")?,
            Err(e) => writeln!(out, "Export failed: {}", e)?,
        },
        Message::Status => write_status(session, out)?,
        Message::List => write_options_list(session, out)?,
        Message::Help => writeln!(out, "{}", HELP)?,
        Message::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
