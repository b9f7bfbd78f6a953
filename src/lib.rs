//! Build orchestration for greeting-variant dummy-slave firmware images.
//!
//! Drives `idf.py` once per requested greeting, injecting the greeting text
//! and device target through the child environment, then copies each
//! produced image to a labeled destination. All compilation is delegated to
//! ESP-IDF; this crate only prepares build directories, invokes the build
//! and finds what it produced.

pub mod artifact;
pub mod build;
pub mod greeting;
pub mod stale;
pub mod toolchain;
