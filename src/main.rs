use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use greetbuild::build;
use greetbuild::greeting::{self, GreetingSpec};
use greetbuild::toolchain::IdfToolchain;

#[derive(Parser)]
#[command(name = "greetbuild")]
#[command(about = "Build greeting-specific ESP-IDF images for the dummy slave", long_about = None)]
#[command(version)]
struct Cli {
    /// IDF target passed to each build via IDF_TARGET
    #[arg(long, default_value = "esp32")]
    idf_target: String,

    /// Greeting build spec in the form NAME:TEXT (can be repeated)
    #[arg(long, value_parser = greeting::parse_spec)]
    greeting: Vec<GreetingSpec>,

    /// Directory where the resulting .bin files are copied
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// The crate checkout doubles as the demo repo root: the slave project and
/// the default artifact directory live next to it.
fn repo_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let toolchain = IdfToolchain::locate()?;

    let greetings = if cli.greeting.is_empty() {
        greeting::default_set()
    } else {
        cli.greeting
    };
    if greetings.is_empty() {
        anyhow::bail!("no greetings provided");
    }

    let project_dir = repo_root().join("demoslave");
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| repo_root().join("artifacts"));

    let total_start = Instant::now();
    let mut results = Vec::with_capacity(greetings.len());
    for spec in &greetings {
        let dest = build::run_build(spec, &cli.idf_target, &project_dir, &output_dir, &toolchain)?;
        results.push(dest);
    }

    println!();
    println!(
        "{}",
        format!(
            "Completed {} build(s) in {:.2}s:",
            results.len(),
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    for dest in &results {
        println!("   {}", dest.display());
    }
    println!();

    Ok(())
}
