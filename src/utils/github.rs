// src/utils/github.rs

//! GitHub Actions output boundary.
//!
//! Actions exposes step outputs through a file named by the
//! `GITHUB_OUTPUT` environment variable, one `key=value` per line.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append a `key=value` line to an Actions output file.
pub fn append_output(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{key}={value}")?;
    Ok(())
}

/// Publish a named step output when running under GitHub Actions.
///
/// A no-op outside of Actions (`GITHUB_OUTPUT` unset).
pub fn set_output(key: &str, value: &str) -> Result<()> {
    match env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_output(Path::new(&path), key, value),
        None => Ok(()),
    }
}
