//! Static script minification for JavaScript project builds.
//!
//! After a bundler has written a build output, this crate minifies the scripts of the
//! project's static directory (`public/`, or `static/` for SvelteKit) and writes them
//! over the verbatim copies in the output directory. The framework is detected from
//! `package.json` unless configured.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use oximinify_static::{BuildPlugin, OutputDescriptor, PluginOptions, StaticMinifyPlugin};
//!
//! let plugin = StaticMinifyPlugin::new(PluginOptions::default());
//!
//! // Called by the host once per output directory after it has been written
//! plugin.write_bundle(&OutputDescriptor::new("dist"));
//! ```
//!
//! ## Inspecting the summary
//!
//! ```no_run
//! use oximinify_static::{OutputDescriptor, PluginOptions, StaticMinifyPlugin};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let plugin = StaticMinifyPlugin::with_root("/path/to/project", PluginOptions::default());
//! let output = OutputDescriptor::new("/path/to/project/dist");
//!
//! if let Some(summary) = plugin.process_output(&output) {
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     oximinify_static::print_summary(&mut stdout, output.dir.as_deref().unwrap(), &summary)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod filter;
mod pipeline;
mod plugin;
mod reporter;
mod types;

// Re-export public API
pub use config::{Config, EffectiveConfig, PluginOptions, resolve_config};
pub use filter::{CLIENT_MARKER, SERVER_MARKERS, should_process};
pub use pipeline::{
    destination_path, is_safe_to_replace, run_pipeline, transform_file, transform_files,
};
pub use plugin::{BuildPlugin, OutputDescriptor, PluginMode, StaticMinifyPlugin};
pub use reporter::{format_bytes, print_skipped_output, print_summary};
pub use types::{FileOutcome, FileTransformResult, RunSummary};
