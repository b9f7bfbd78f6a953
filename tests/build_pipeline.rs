//! End-to-end pipeline tests against a stub build driver.
//!
//! The stub is a `sh` script standing in for idf.py: it receives the same
//! `-C <project> -B <build-dir> build` argv and the same environment
//! variables, and deposits a `project_name.txt` plus a matching `.bin` the
//! way a finished ESP-IDF build would.

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use greetbuild::build::run_build;
use greetbuild::greeting::GreetingSpec;
use greetbuild::toolchain::IdfToolchain;
use tempfile::TempDir;

const STUB_OK: &str = r#"#!/bin/sh
BUILD_DIR="$4"
mkdir -p "$BUILD_DIR"
printf 'demoslave\n' > "$BUILD_DIR/project_name.txt"
printf 'IMG:%s:%s' "$SLAVE_GREETING_OVERRIDE" "$IDF_TARGET" > "$BUILD_DIR/demoslave.bin"
"#;

const STUB_FAIL: &str = "#!/bin/sh\nexit 7\n";

const STUB_NO_ARTIFACT: &str = "#!/bin/sh\nmkdir -p \"$4\"\n";

fn stub_toolchain(dir: &Path, script: &str) -> IdfToolchain {
    let driver = dir.join("idf.py");
    fs::write(&driver, script).unwrap();
    IdfToolchain {
        idf_py: driver,
        python_cmd: "sh".to_string(),
    }
}

fn spec(name: &str, text: &str) -> GreetingSpec {
    GreetingSpec {
        name: name.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn builds_each_greeting_and_copies_labeled_images() {
    let tmp = TempDir::new().unwrap();
    let toolchain = stub_toolchain(tmp.path(), STUB_OK);
    let project_dir = tmp.path().join("demoslave");
    fs::create_dir(&project_dir).unwrap();
    let output_dir = tmp.path().join("artifacts");

    let greetings = [
        spec("hello", "Hello from slave"),
        spec("bye", "Bye from slave"),
    ];

    let mut results: Vec<PathBuf> = Vec::new();
    for g in &greetings {
        results.push(run_build(g, "esp32", &project_dir, &output_dir, &toolchain).unwrap());
    }

    assert_eq!(
        results,
        vec![output_dir.join("hello.bin"), output_dir.join("bye.bin")]
    );

    let hello = fs::read(output_dir.join("hello.bin")).unwrap();
    assert_eq!(hello, b"IMG:Hello from slave:esp32");
    let bye = fs::read(output_dir.join("bye.bin")).unwrap();
    assert_eq!(bye, b"IMG:Bye from slave:esp32");

    // Copies must be byte-identical to what the build produced.
    let built = fs::read(project_dir.join("build-hello").join("demoslave.bin")).unwrap();
    assert_eq!(built, hello);
}

#[test]
fn target_is_forwarded_to_the_build_environment() {
    let tmp = TempDir::new().unwrap();
    let toolchain = stub_toolchain(tmp.path(), STUB_OK);
    let project_dir = tmp.path().join("demoslave");
    fs::create_dir(&project_dir).unwrap();
    let output_dir = tmp.path().join("artifacts");

    run_build(
        &spec("hi", "Hi"),
        "esp32s3",
        &project_dir,
        &output_dir,
        &toolchain,
    )
    .unwrap();

    let image = fs::read(output_dir.join("hi.bin")).unwrap();
    assert_eq!(image, b"IMG:Hi:esp32s3");
}

#[test]
fn failing_build_tool_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let toolchain = stub_toolchain(tmp.path(), STUB_FAIL);
    let project_dir = tmp.path().join("demoslave");
    fs::create_dir(&project_dir).unwrap();
    let output_dir = tmp.path().join("artifacts");

    let err = run_build(
        &spec("hello", "Hello from slave"),
        "esp32",
        &project_dir,
        &output_dir,
        &toolchain,
    )
    .unwrap_err();

    assert!(err.to_string().contains("build failed"));
    assert!(!output_dir.exists());
}

#[test]
fn build_without_artifact_reports_misconfiguration() {
    let tmp = TempDir::new().unwrap();
    let toolchain = stub_toolchain(tmp.path(), STUB_NO_ARTIFACT);
    let project_dir = tmp.path().join("demoslave");
    fs::create_dir(&project_dir).unwrap();
    let output_dir = tmp.path().join("artifacts");

    let err = run_build(
        &spec("hello", "Hello from slave"),
        "esp32",
        &project_dir,
        &output_dir,
        &toolchain,
    )
    .unwrap_err();

    assert!(err.to_string().contains("no firmware image"));
}

#[test]
fn foreign_build_dir_is_discarded_before_building() {
    let tmp = TempDir::new().unwrap();
    let toolchain = stub_toolchain(tmp.path(), STUB_OK);
    let project_dir = tmp.path().join("demoslave");
    let build_dir = project_dir.join("build-hello");
    fs::create_dir_all(&build_dir).unwrap();
    fs::write(
        build_dir.join("CMakeCache.txt"),
        "CMAKE_HOME_DIRECTORY:INTERNAL=/somewhere/else/demoslave\n",
    )
    .unwrap();
    fs::write(build_dir.join("stale.o"), b"obj").unwrap();
    let output_dir = tmp.path().join("artifacts");

    run_build(
        &spec("hello", "Hello from slave"),
        "esp32",
        &project_dir,
        &output_dir,
        &toolchain,
    )
    .unwrap();

    assert!(!build_dir.join("stale.o").exists());
    assert!(output_dir.join("hello.bin").exists());
}
