#![warn(missing_docs)]
//! # greetcast-resources
//!
//! ## Purpose
//! Loads the campaign's three input files: contact list, message template,
//! and phrase pool.
//!
//! ## Responsibilities
//! - Read UTF-8 line-oriented lists, trimming entries and dropping blank
//!   lines.
//! - Read the template file verbatim.
//! - Distinguish a missing file from every other read failure.
//!
//! ## Data flow
//! The app entry point calls [`load_lines`]/[`load_template`] once before any
//! automation starts; loaded values are immutable for the rest of the run.
//!
//! ## Error model
//! All failures are fatal to the run: without a contact list, template, or
//! phrase pool there is nothing meaningful to automate. [`ResourceError`]
//! carries the offending path so the operator can fix the input.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Loads a list file: one entry per line, trimmed, blank lines dropped.
///
/// # Errors
/// Returns [`ResourceError::NotFound`] when `path` does not exist and
/// [`ResourceError::Read`] for any other I/O failure (permissions, invalid
/// UTF-8).
pub fn load_lines(path: &Path) -> Result<Vec<String>, ResourceError> {
    let raw = read_file(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Loads the message template as one verbatim string.
///
/// Leading/trailing whitespace is preserved; the template is substituted, not
/// parsed, so its exact bytes matter.
///
/// # Errors
/// Same taxonomy as [`load_lines`].
pub fn load_template(path: &Path) -> Result<String, ResourceError> {
    read_file(path)
}

fn read_file(path: &Path) -> Result<String, ResourceError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ResourceError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ResourceError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Resource loading error type.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource file does not exist.
    #[error("resource file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The resource file exists but could not be read.
    #[error("resource file {path} could not be read: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}
