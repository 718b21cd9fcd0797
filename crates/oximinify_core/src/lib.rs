//! Core utilities for oximinify tools.
//!
//! This crate provides shared functionality for minifying static scripts of
//! JavaScript projects, including:
//! - Detecting the web framework from `package.json` dependencies
//! - Selecting files under a directory with glob patterns
//! - Minifying JS/TS sources with the oxc toolchain
//! - Minifier option groups and their deep merge with user overrides

mod collector;
mod constants;
mod manifest;
mod minifier;
mod options;
mod types;

// Re-export public API
pub use collector::{build_glob_set, collect_files};
pub use constants::{
    DEFAULT_FILE_PATTERNS, DEFAULT_SOURCE_DIR, MANIFEST_FILE, REACT_MARKERS, SVELTEKIT_MARKERS,
    SVELTEKIT_SOURCE_DIR, VUE_MARKERS,
};
pub use manifest::{Manifest, detect_framework, framework_for, read_manifest};
pub use minifier::minify;
pub use options::{CompressOptions, FormatOptions, MangleOptions, MinifyOptions};
pub use types::{Framework, FrameworkRequest, Loader};
