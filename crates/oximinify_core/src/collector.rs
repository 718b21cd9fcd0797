use anyhow::{Context, Result, anyhow};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::{Component, Path, PathBuf};

/// Builds one matcher out of every pattern. Invalid patterns are skipped with a warning.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // `*` stays within one path segment, `**` crosses directories
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                trace!("Adding glob pattern: '{}'", pattern);
                builder.add(glob);
            }
            Err(e) => warn!("Skipping invalid glob pattern '{}': {}", pattern, e),
        }
    }
    builder.build().context("Failed to build glob set")
}

/// Collects the regular files under `source_dir` matching any of `patterns`.
///
/// Returned paths are relative to `source_dir`, in discovery order. The order is not
/// stable across platforms; treat the result as a set. Directories and symbolic links
/// are never returned.
pub fn collect_files(source_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    debug!("Collecting files from {} with patterns {:?}", source_dir.display(), patterns);
    if !source_dir.is_dir() {
        return Err(anyhow!("Source directory {} is not a directory", source_dir.display()));
    }

    let globs = build_glob_set(patterns)?;
    if globs.is_empty() {
        debug!("No usable patterns, nothing to collect");
        return Ok(Vec::new());
    }

    // A static directory is copied verbatim by the bundler, so ignore files do not apply
    let walker =
        WalkBuilder::new(source_dir).standard_filters(false).follow_links(false).build();

    let mut files = Vec::new();
    for res in walker {
        // One unreadable entry must not hide the rest of the tree
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", source_dir.display(), e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Ok(rel_path) = dent.path().strip_prefix(source_dir) else {
            continue;
        };
        if globs.is_match(slash_path(rel_path)) {
            trace!("Matched file: {}", rel_path.display());
            files.push(rel_path.to_path_buf());
        }
    }

    debug!("Collected {} files", files.len());
    Ok(files)
}

/// Joins normal components with `/` so patterns match the same way on every platform
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
