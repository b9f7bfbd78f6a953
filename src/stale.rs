//! Staleness check for idf.py build directories.
//!
//! CMake bakes absolute source paths into `CMakeCache.txt`; reusing a build
//! directory that was configured for a different location of the project
//! sources makes idf.py fail in confusing ways. A cache that does not
//! mention the current project directory is discarded so the next build
//! reconfigures from scratch.

use std::fs;
use std::path::Path;

use colored::Colorize;

const CACHE_MARKER: &str = "CMakeCache.txt";

/// Remove `build_dir` if its CMake cache was written for a different
/// checkout of the project sources.
///
/// Absent or unreadable caches leave the directory alone; deletion is
/// best-effort and deletion errors are swallowed.
pub fn ensure_fresh_build_dir(build_dir: &Path, project_dir: &Path) {
    let Ok(raw) = fs::read(build_dir.join(CACHE_MARKER)) else {
        return;
    };
    // CMakeCache.txt occasionally carries non-UTF-8 bytes; match lossily.
    let cache_contents = String::from_utf8_lossy(&raw);

    let resolved = fs::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
    if cache_contents.contains(resolved.to_string_lossy().as_ref()) {
        return;
    }

    println!(
        "{}",
        format!(
            "Removing stale build directory {} (cache for a different project location)",
            build_dir.display()
        )
        .yellow()
    );
    let _ = fs::remove_dir_all(build_dir);
}
