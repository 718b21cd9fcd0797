use log::{debug, error, info, warn};
use oximinify_core::detect_framework;
use std::{
    borrow::Cow,
    env,
    path::{Path, PathBuf},
};

use crate::{
    config::{EffectiveConfig, PluginOptions, resolve_config},
    filter::should_process,
    pipeline::run_pipeline,
    reporter::format_bytes,
    types::RunSummary,
};

/// Whether the host is producing a build or running a development server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginMode {
    Build,
    Serve,
}

/// What the host knows about one build output once it has been written.
#[derive(Debug, Clone, Default)]
pub struct OutputDescriptor {
    pub dir: Option<PathBuf>,
}

impl OutputDescriptor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }
}

/// Contract between a bundler and its post-build extensions.
pub trait BuildPlugin {
    fn name(&self) -> Cow<'static, str>;

    /// Whether the plugin takes part in `mode`. Build-only by default.
    fn apply(&self, mode: PluginMode) -> bool {
        mode == PluginMode::Build
    }

    /// Fired once per build output after the host finished writing it.
    /// Must not fail the host build.
    fn write_bundle(&self, output: &OutputDescriptor);
}

/// Minifies a project's static scripts into its client build output.
#[derive(Debug, Clone)]
pub struct StaticMinifyPlugin {
    config: EffectiveConfig,
    project_root: PathBuf,
}

impl StaticMinifyPlugin {
    /// Create a plugin for the project in the current working directory
    pub fn new(options: PluginOptions) -> Self {
        let root = env::current_dir().unwrap_or_else(|e| {
            warn!("Failed to read current directory ({}), using '.'", e);
            PathBuf::from(".")
        });
        Self::with_root(root, options)
    }

    /// Create a plugin for the project at `project_root`
    pub fn with_root(project_root: impl Into<PathBuf>, options: PluginOptions) -> Self {
        let project_root = project_root.into();
        let config = resolve_config(&options, || detect_framework(&project_root));
        Self { config, project_root }
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The source directory, resolved against the project root
    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.source_dir)
    }

    /// Runs the hook's work and hands back the summary.
    ///
    /// Returns `None` when the output has no directory, is filtered out, or the source
    /// directory could not be listed.
    pub fn process_output(&self, output: &OutputDescriptor) -> Option<RunSummary> {
        let Some(dir) = output.dir.as_deref() else {
            warn!("Build output has no directory, skipping static script minification");
            return None;
        };

        if !should_process(dir, self.config.framework) {
            debug!("Skipping build output {} for {}", dir.display(), self.config.framework);
            return None;
        }

        match run_pipeline(&self.config, &self.source_dir(), dir) {
            Ok(summary) => {
                if self.config.verbose && !summary.is_noop() {
                    info!(
                        "Minified {} files into {}, saved {}",
                        summary.files_transformed,
                        dir.display(),
                        format_bytes(summary.bytes_saved)
                    );
                }
                Some(summary)
            }
            Err(e) => {
                error!("Static script minification failed for {}: {:#}", dir.display(), e);
                None
            }
        }
    }
}

impl BuildPlugin for StaticMinifyPlugin {
    fn name(&self) -> Cow<'static, str> {
        "oximinify-static".into()
    }

    fn write_bundle(&self, output: &OutputDescriptor) {
        self.process_output(output);
    }
}
