//! JSON backup export and import.
//!
//! # Responsibility
//! - Serialize the project collection to a pretty-printed backup file.
//! - Parse user-supplied backup text, all-or-nothing.
//!
//! # Invariants
//! - Import accepts only a top-level JSON array; anything else is rejected
//!   as a whole and never partially applied.
//! - Backup file names are `storycraft_backup_<YYYY-MM-DD>.json`.

use crate::model::project::Project;
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BACKUP_FILE_PREFIX: &str = "storycraft_backup_";

/// Errors from writing a backup.
#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize projects: {err}"),
            Self::Io(err) => write!(f, "failed to write backup file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Errors from reading a backup. Every variant leaves state unchanged.
#[derive(Debug)]
pub enum ImportError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The text is not valid JSON.
    Malformed(serde_json::Error),
    /// Valid JSON whose top-level value is not an array.
    NotASequence,
    /// An array entry does not have the project shape.
    InvalidProject(serde_json::Error),
}

impl ImportError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Io(_) => "The backup file could not be opened.",
            Self::Malformed(_) => "The file could not be read as JSON.",
            Self::NotASequence => "The file must contain an array of projects.",
            Self::InvalidProject(_) => "The file contains a project that could not be read.",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "import_io_failed",
            Self::Malformed(_) => "import_malformed_json",
            Self::NotASequence => "import_not_array",
            Self::InvalidProject(_) => "import_invalid_project",
        }
    }
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read backup file: {err}"),
            Self::Malformed(err) => write!(f, "backup is not valid JSON: {err}"),
            Self::NotASequence => write!(f, "backup top-level value must be an array"),
            Self::InvalidProject(err) => write!(f, "backup contains an invalid project: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) | Self::InvalidProject(err) => Some(err),
            Self::NotASequence => None,
        }
    }
}

/// Serializes projects as two-space indented JSON.
pub fn export_json(projects: &[Project]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(projects)?)
}

/// Backup file name for `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Writes a dated backup file into `dir`, creating the directory if needed.
///
/// An existing backup for the same date is overwritten.
pub fn export_to_dir(
    projects: &[Project],
    dir: impl AsRef<Path>,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    let json = export_json(projects)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(backup_file_name(date));
    std::fs::write(&path, json).map_err(|err| {
        error!("event=backup_export module=backup status=error error_code=write_failed error={err}");
        err
    })?;

    info!(
        "event=backup_export module=backup status=ok projects={} path={}",
        projects.len(),
        path.display()
    );
    Ok(path)
}

/// Parses backup text into a project collection.
pub fn parse_import(text: &str) -> Result<Vec<Project>, ImportError> {
    let result = parse_value(text);
    match &result {
        Ok(projects) => info!(
            "event=backup_import module=backup status=ok projects={}",
            projects.len()
        ),
        Err(err) => error!(
            "event=backup_import module=backup status=error error_code={}",
            err.code()
        ),
    }
    result
}

/// Reads and parses a backup file.
pub fn import_from_path(path: impl AsRef<Path>) -> Result<Vec<Project>, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        let err = ImportError::Io(err);
        error!(
            "event=backup_import module=backup status=error error_code={}",
            err.code()
        );
        err
    })?;
    parse_import(&text)
}

fn parse_value(text: &str) -> Result<Vec<Project>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    if !value.is_array() {
        return Err(ImportError::NotASequence);
    }
    serde_json::from_value(value).map_err(ImportError::InvalidProject)
}
