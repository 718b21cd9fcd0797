use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use oximinify_core::{
    DEFAULT_FILE_PATTERNS, DEFAULT_SOURCE_DIR, Framework, FrameworkRequest, MinifyOptions,
    SVELTEKIT_SOURCE_DIR,
};
use serde_json::Value;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "static")]
#[command(about = "Minify static scripts into the build output of a JavaScript project")]
pub struct Config {
    /// Root directory of the project, holding package.json (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// JSON file with plugin options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the static scripts (defaults to `static` for SvelteKit, else `public`)
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Glob patterns selecting files, relative to the source directory
    #[arg(long, num_args = 1..)]
    pub files: Vec<String>,

    /// Framework: sveltekit, react, vue, vanilla or auto
    #[arg(long)]
    pub framework: Option<String>,

    /// Report per-file sizes and progress
    #[arg(long)]
    pub verbose: bool,

    /// Subdirectory of each build output to write into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Build output directory to process, once per flag (relative to the project root)
    #[arg(long = "out", required = true)]
    pub outputs: Vec<PathBuf>,
}

impl Config {
    /// Resolve the project root, defaulting to the current directory
    pub fn root(&self) -> Result<PathBuf> {
        match &self.root {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                Ok(r.canonicalize().unwrap_or_else(|_| r.clone()))
            }
            None => env::current_dir().context("Failed to read current directory"),
        }
    }

    /// Build output directories resolved against `root`, absolute ones unchanged
    pub fn output_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.outputs.iter().map(|dir| root.join(dir)).collect()
    }

    /// Layer the config file (if any) under the command line flags
    pub fn plugin_options(&self) -> Result<PluginOptions> {
        let mut options = match &self.config {
            Some(path) => PluginOptions::from_file(path)?,
            None => PluginOptions::default(),
        };

        if let Some(dir) = &self.source_dir {
            options.source_dir = Some(dir.clone());
        }
        if !self.files.is_empty() {
            options.files = Some(self.files.clone());
        }
        if let Some(framework) = &self.framework {
            options.framework = parse_framework(framework);
        }
        if self.verbose {
            options.verbose = Some(true);
        }
        if let Some(dir) = &self.output_dir {
            options.output_dir = Some(dir.clone());
        }
        Ok(options)
    }
}

/// Options a user hands to the plugin. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginOptions {
    pub source_dir: Option<PathBuf>,
    pub files: Option<Vec<String>>,
    pub framework: FrameworkRequest,
    pub verbose: Option<bool>,
    pub output_dir: Option<PathBuf>,
    /// Forwarded to the minifier and merged over its defaults
    pub minify_options: Value,
}

impl PluginOptions {
    /// Reads options from a JSON object. A malformed field falls back to its default
    /// without affecting the others.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).filter(|v| !v.is_null());

        let source_dir = field("sourceDir").and_then(|v| match v.as_str() {
            Some(s) => Some(PathBuf::from(s)),
            None => ignored("sourceDir", v),
        });
        let files = field("files").and_then(|v| match string_list(v) {
            Some(list) => Some(list),
            None => ignored("files", v),
        });
        let framework = field("framework")
            .and_then(|v| match v.as_str() {
                Some(s) => Some(parse_framework(s)),
                None => ignored("framework", v),
            })
            .unwrap_or_default();
        let verbose = field("verbose").and_then(|v| match v.as_bool() {
            Some(b) => Some(b),
            None => ignored("verbose", v),
        });
        let output_dir = field("outputDir").and_then(|v| match v.as_str() {
            Some(s) => Some(PathBuf::from(s)),
            None => ignored("outputDir", v),
        });
        let minify_options = field("minifyOptions").cloned().unwrap_or(Value::Null);

        Self { source_dir, files, framework, verbose, output_dir, minify_options }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading plugin options from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self::from_json(&value))
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(|v| v.as_str().map(str::to_string)).collect()
}

fn ignored<T>(name: &str, value: &Value) -> Option<T> {
    debug!("Ignoring malformed option '{}': {}", name, value);
    None
}

/// Unknown names are treated as `auto`
fn parse_framework(name: &str) -> FrameworkRequest {
    name.parse().unwrap_or_else(|e| {
        debug!("{}, detecting instead", e);
        FrameworkRequest::Auto
    })
}

/// The configuration a plugin instance runs with, resolved once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub source_dir: PathBuf,
    pub file_patterns: Vec<String>,
    pub minify_options: MinifyOptions,
    pub verbose: bool,
    /// Inserted between the build output directory and each file's relative path
    pub output_subdir: Option<PathBuf>,
    pub framework: Framework,
}

/// Merges user options with framework and hard-coded defaults.
///
/// `detect` is only called when the user did not name a framework.
pub fn resolve_config<F>(options: &PluginOptions, detect: F) -> EffectiveConfig
where
    F: FnOnce() -> Framework,
{
    let framework = match options.framework {
        FrameworkRequest::Fixed(framework) => framework,
        FrameworkRequest::Auto => detect(),
    };

    let source_dir = options.source_dir.clone().unwrap_or_else(|| {
        PathBuf::from(match framework {
            Framework::SvelteKit => SVELTEKIT_SOURCE_DIR,
            _ => DEFAULT_SOURCE_DIR,
        })
    });

    let file_patterns = options
        .files
        .clone()
        .unwrap_or_else(|| DEFAULT_FILE_PATTERNS.iter().map(|p| p.to_string()).collect());

    let config = EffectiveConfig {
        source_dir,
        file_patterns,
        minify_options: MinifyOptions::default().merged(&options.minify_options),
        verbose: options.verbose.unwrap_or(false),
        output_subdir: options.output_dir.clone(),
        framework,
    };
    if config.verbose {
        info!(
            "Framework: {}, source directory: {}, patterns: {:?}",
            config.framework,
            config.source_dir.display(),
            config.file_patterns
        );
    }
    config
}
