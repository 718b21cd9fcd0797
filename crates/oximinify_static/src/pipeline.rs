use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, trace, warn};
use oximinify_core::{Loader, collect_files, minify};
use path_clean::PathClean;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    config::EffectiveConfig,
    types::{FileOutcome, FileTransformResult, RunSummary},
};

/// Minifies every selected file under `source_dir` into `output_dir`.
///
/// Only a failure to list the source directory is returned as an error; per-file
/// problems end up in the summary.
pub fn run_pipeline(
    cfg: &EffectiveConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<RunSummary> {
    if cfg.verbose {
        info!(
            "Minifying static scripts from {} into {}",
            source_dir.display(),
            output_dir.display()
        );
    }

    if !source_dir.exists() {
        warn!("Source directory {} does not exist, nothing to minify", source_dir.display());
        return Ok(RunSummary::default());
    }

    let files = collect_files(source_dir, &cfg.file_patterns)?;
    if files.is_empty() {
        if cfg.verbose {
            info!(
                "No files matching {:?} in {}, nothing to minify",
                cfg.file_patterns,
                source_dir.display()
            );
        }
        return Ok(RunSummary::default());
    }
    debug!("Found {} files to minify", files.len());

    Ok(transform_files(cfg, source_dir, output_dir, &files))
}

/// Processes `files` (relative to `source_dir`) one after another.
pub fn transform_files(
    cfg: &EffectiveConfig,
    source_dir: &Path,
    output_dir: &Path,
    files: &[PathBuf],
) -> RunSummary {
    let summary = files
        .iter()
        .map(|rel_path| transform_file(cfg, source_dir, output_dir, rel_path))
        .fold(RunSummary::default(), |summary, result| summary.record(&result));

    debug!(
        "Transformed {} files, skipped {}, failed {}",
        summary.files_transformed, summary.files_skipped, summary.files_failed
    );
    summary
}

/// Minifies one file. Never fails: every problem becomes an outcome.
pub fn transform_file(
    cfg: &EffectiveConfig,
    source_dir: &Path,
    output_dir: &Path,
    rel_path: &Path,
) -> FileTransformResult {
    trace!("Transforming {}", rel_path.display());
    let result = try_transform(cfg, source_dir, output_dir, rel_path).unwrap_or_else(|e| {
        let outcome = FileOutcome::Error(format!("{:#}", e));
        FileTransformResult::skipped(rel_path.to_path_buf(), outcome)
    });
    report(cfg, &result);
    result
}

fn try_transform(
    cfg: &EffectiveConfig,
    source_dir: &Path,
    output_dir: &Path,
    rel_path: &Path,
) -> Result<FileTransformResult> {
    let rel = rel_path.to_path_buf();
    let source = source_dir.join(rel_path);
    let dest = destination_path(output_dir, cfg.output_subdir.as_deref(), rel_path)?;

    let content = match fs::read_to_string(&source) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(FileTransformResult::skipped(rel, FileOutcome::SkippedMissing));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", source.display())),
    };

    let minified = minify(&content, Loader::for_path(rel_path), &cfg.minify_options)?;
    if minified.trim().is_empty() {
        return Ok(FileTransformResult {
            path: rel,
            original_size: content.len(),
            minified_size: 0,
            outcome: FileOutcome::SkippedEmptyResult,
        });
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    if !is_safe_to_replace(&dest) {
        return Ok(FileTransformResult::skipped(rel, FileOutcome::SkippedUnsafeDestination));
    }
    if dest.exists() {
        trace!("Removing existing file at {}", dest.display());
        fs::remove_file(&dest).with_context(|| format!("Failed to remove {}", dest.display()))?;
    }

    fs::write(&dest, &minified).with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(FileTransformResult {
        path: rel,
        original_size: content.len(),
        minified_size: minified.len(),
        outcome: FileOutcome::Success,
    })
}

/// Builds the destination for `rel_path`, refusing paths that leave `output_dir`.
pub fn destination_path(
    output_dir: &Path,
    output_subdir: Option<&Path>,
    rel_path: &Path,
) -> Result<PathBuf> {
    let root = output_dir.clean();
    let mut dest = root.clone();
    if let Some(subdir) = output_subdir {
        dest.push(subdir);
    }
    dest.push(rel_path);
    let dest = dest.clean();

    if dest == root || !dest.starts_with(&root) {
        return Err(anyhow!(
            "Destination {} escapes output directory {}",
            dest.display(),
            root.display()
        ));
    }
    Ok(dest)
}

/// Only a missing path or a regular file may be replaced.
pub fn is_safe_to_replace(dest: &Path) -> bool {
    match fs::symlink_metadata(dest) {
        Ok(meta) => meta.file_type().is_file(),
        Err(e) => e.kind() == io::ErrorKind::NotFound,
    }
}

fn report(cfg: &EffectiveConfig, result: &FileTransformResult) {
    let path = result.path.display();
    match &result.outcome {
        FileOutcome::Success => {
            if cfg.verbose {
                info!(
                    "{}: {} -> {} bytes ({:.1}% smaller)",
                    path,
                    result.original_size,
                    result.minified_size,
                    savings_percent(result.original_size, result.minified_size)
                );
            }
        }
        FileOutcome::SkippedMissing => {
            if cfg.verbose {
                warn!("{}: source file disappeared before minification, skipping", path);
            } else {
                debug!("{}: source file missing, skipping", path);
            }
        }
        FileOutcome::SkippedEmptyResult => {
            warn!("{}: minifier produced no output, leaving destination untouched", path);
        }
        FileOutcome::SkippedUnsafeDestination => {
            warn!("{}: destination exists and is not a regular file, skipping", path);
        }
        FileOutcome::Error(cause) => error!("{}: {}", path, cause),
    }
}

fn savings_percent(original: usize, minified: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - minified as f64) / original as f64 * 100.0
}
