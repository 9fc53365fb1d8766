// src/explorer/selection.rs
// =============================================================================
// Decides what the viewer shows for the files ticked in the tree.
//
// - nothing ticked       -> Halt: render nothing, say nothing
// - more than one ticked -> Warning: ask for one file at a time
// - exactly one ticked   -> View: fetch, decode, pick a highlighting mode
// =============================================================================

use serde::Serialize;
use tracing::{debug, warn};

use super::language::resolve_language;
use crate::codecommit::SourceControl;
use crate::error::{ExplorerError, Result};

pub const ONE_FILE_WARNING: &str = "Please select one file at a time.";

/// A file ready for the read-only viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub path: String,
    pub content: String,
    pub language: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionOutcome {
    Halt,
    Warning { message: String },
    View(FileView),
}

/// Turns the ticked tree values (absolute file paths) into what to render.
///
/// Only the single-file case touches the network.
pub async fn resolve_selection(
    source: &dyn SourceControl,
    repository: &str,
    checked: &[String],
) -> Result<SelectionOutcome> {
    match checked {
        [] => Ok(SelectionOutcome::Halt),
        [path] => {
            let view = open_file(source, repository, path).await?;
            Ok(SelectionOutcome::View(view))
        }
        many => {
            warn!(repository, selected = many.len(), "more than one file selected");
            Ok(SelectionOutcome::Warning {
                message: ONE_FILE_WARNING.to_string(),
            })
        }
    }
}

/// Fetches one file and prepares it for display.
pub async fn open_file(source: &dyn SourceControl, repository: &str, path: &str) -> Result<FileView> {
    let bytes = source.get_file(repository, path).await?;
    debug!(repository, path, size = bytes.len(), "fetched file");

    let content = String::from_utf8(bytes).map_err(|_| ExplorerError::InvalidUtf8 {
        path: path.to_string(),
    })?;

    Ok(FileView {
        path: path.to_string(),
        content,
        language: resolve_language(path),
    })
}
