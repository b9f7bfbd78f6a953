//! Locate the ESP-IDF build driver and the interpreter to invoke it with.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

const IDF_DRIVER: &str = "idf.py";
const PYTHON_OVERRIDE_VAR: &str = "PYTHON";
const DEFAULT_PYTHON: &str = "python3";

/// Resolved handle to the build driver, shared read-only across all builds.
#[derive(Debug, Clone)]
pub struct IdfToolchain {
    /// Full path to `idf.py` as found on `PATH`.
    pub idf_py: PathBuf,
    /// Interpreter command used to invoke it.
    pub python_cmd: String,
}

impl IdfToolchain {
    /// Search `PATH` for `idf.py` and pick the interpreter to run it with.
    ///
    /// A missing driver is a precondition failure for the whole run, not a
    /// retryable error.
    pub fn locate() -> Result<Self> {
        let Some(idf_py) = find_in_path(IDF_DRIVER, env::var_os("PATH")) else {
            eprintln!("{}", "idf.py not found in PATH.".red().bold());
            eprintln!(
                "{}",
                "Run the ESP-IDF export script first (. $IDF_PATH/export.sh)".dimmed()
            );
            anyhow::bail!("idf.py not found in PATH");
        };

        let python_cmd = python_command(env::var(PYTHON_OVERRIDE_VAR).ok());
        Ok(Self { idf_py, python_cmd })
    }
}

/// Scan each `PATH` entry for a file with the given name.
fn find_in_path(program: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in env::split_paths(&path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// `PYTHON` wins when set and non-blank; otherwise the conventional name.
fn python_command(override_var: Option<String>) -> String {
    match override_var {
        Some(cmd) if !cmd.trim().is_empty() => cmd,
        _ => DEFAULT_PYTHON.to_string(),
    }
}
