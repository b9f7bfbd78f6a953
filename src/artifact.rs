//! Locate the firmware image produced by an idf.py build.
//!
//! Two discovery conventions, tried in order and each independently
//! optional: `project_name.txt` (plain text, `<name>.bin` next to it) and
//! `project_description.json` (explicit `app_bin` relative path, then the
//! same `<name>.bin` convention from its `project_name` field).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const PROJECT_NAME_FILE: &str = "project_name.txt";
const PROJECT_DESCRIPTION_FILE: &str = "project_description.json";

/// Subset of `project_description.json` this tool cares about. Everything
/// else in the file is ignored.
#[derive(Debug, Deserialize)]
struct ProjectDescription {
    #[serde(default)]
    app_bin: Option<String>,
    #[serde(default)]
    project_name: Option<String>,
}

/// Find the built `.bin` inside `build_dir`.
///
/// Unreadable or malformed metadata files fall through to the next
/// strategy. `None` means the build finished but no image could be found,
/// which callers treat as a misconfigured build directory.
pub fn locate_project_image(build_dir: &Path) -> Option<PathBuf> {
    if let Ok(raw) = fs::read_to_string(build_dir.join(PROJECT_NAME_FILE)) {
        if let Some(candidate) = named_bin(build_dir, raw.trim()) {
            return Some(candidate);
        }
    }

    if let Ok(raw) = fs::read_to_string(build_dir.join(PROJECT_DESCRIPTION_FILE)) {
        if let Ok(desc) = serde_json::from_str::<ProjectDescription>(&raw) {
            if let Some(app_bin) = desc.app_bin.as_deref().filter(|s| !s.is_empty()) {
                let candidate = build_dir.join(app_bin);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
            if let Some(project_name) = desc.project_name.as_deref() {
                if let Some(candidate) = named_bin(build_dir, project_name) {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

/// `<build-dir>/<name>.bin`, if the name is non-empty and the file exists.
fn named_bin(build_dir: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let candidate = build_dir.join(format!("{name}.bin"));
    candidate.exists().then_some(candidate)
}
