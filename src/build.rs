//! One greeting, one idf.py invocation, one labeled image copy.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::artifact;
use crate::greeting::GreetingSpec;
use crate::stale;
use crate::toolchain::IdfToolchain;

/// Consumed by the demoslave project at configure time.
const GREETING_ENV: &str = "SLAVE_GREETING_OVERRIDE";
const TARGET_ENV: &str = "IDF_TARGET";

/// Run one full build for `greeting` and copy the image into `output_dir`.
///
/// Returns the destination path. The greeting text and target reach the
/// build only through the child environment; the parent environment is
/// inherited untouched. Any failure here aborts the whole run: a failed
/// build tool, a missing artifact and a failed copy are all fatal.
pub fn run_build(
    greeting: &GreetingSpec,
    target: &str,
    project_dir: &Path,
    output_dir: &Path,
    toolchain: &IdfToolchain,
) -> Result<PathBuf> {
    let build_dir = project_dir.join(format!("build-{}", greeting.name));
    stale::ensure_fresh_build_dir(&build_dir, project_dir);

    println!();
    println!(
        "{}",
        format!(
            "Building greeting '{}' -> {}",
            greeting.text,
            build_dir.display()
        )
        .cyan()
        .bold()
    );

    let start = Instant::now();
    let status = Command::new(&toolchain.python_cmd)
        .arg(&toolchain.idf_py)
        .arg("-C")
        .arg(project_dir)
        .arg("-B")
        .arg(&build_dir)
        .arg("build")
        .env(GREETING_ENV, &greeting.text)
        .env(TARGET_ENV, target)
        .status()
        .with_context(|| {
            format!(
                "failed to run {} {}",
                toolchain.python_cmd,
                toolchain.idf_py.display()
            )
        })?;

    if !status.success() {
        eprintln!(
            "{}",
            format!("Build failed for greeting '{}'", greeting.name)
                .red()
                .bold()
        );
        anyhow::bail!("idf.py build failed for greeting '{}'", greeting.name);
    }
    println!(
        "{}",
        format!("Build finished in {:.2}s", start.elapsed().as_secs_f64()).green()
    );

    let Some(image) = artifact::locate_project_image(&build_dir) else {
        eprintln!(
            "{}",
            "project_name.txt or project_description.json did not yield a firmware image."
                .red()
                .bold()
        );
        eprintln!(
            "{}",
            format!(
                "Run 'idf.py reconfigure' inside {} and re-run this tool.",
                build_dir.display()
            )
            .dimmed()
        );
        anyhow::bail!("no firmware image found in {}", build_dir.display());
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let dest = output_dir.join(format!("{}.bin", greeting.name));
    fs::copy(&image, &dest)
        .with_context(|| format!("failed to copy {} to {}", image.display(), dest.display()))?;
    println!(
        "{}",
        format!("Copied {} -> {}", image.display(), dest.display()).green()
    );

    Ok(dest)
}
