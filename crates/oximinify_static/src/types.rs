use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success,
    /// The source file vanished between selection and processing
    SkippedMissing,
    /// The minifier produced no code
    SkippedEmptyResult,
    /// Something other than a regular file sits at the destination
    SkippedUnsafeDestination,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct FileTransformResult {
    /// Path relative to the source directory
    pub path: PathBuf,
    pub original_size: usize,
    pub minified_size: usize,
    pub outcome: FileOutcome,
}

impl FileTransformResult {
    pub fn skipped(path: PathBuf, outcome: FileOutcome) -> Self {
        Self { path, original_size: 0, minified_size: 0, outcome }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_transformed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub original_bytes: usize,
    pub minified_bytes: usize,
    /// Negative when minification grew the files
    pub bytes_saved: i64,
}

impl RunSummary {
    /// Folds one file result into the summary.
    pub fn record(mut self, result: &FileTransformResult) -> Self {
        match result.outcome {
            FileOutcome::Success => {
                self.files_transformed += 1;
                self.original_bytes += result.original_size;
                self.minified_bytes += result.minified_size;
                self.bytes_saved += result.original_size as i64 - result.minified_size as i64;
            }
            FileOutcome::Error(_) => self.files_failed += 1,
            _ => self.files_skipped += 1,
        }
        self
    }

    pub fn is_noop(&self) -> bool {
        self.files_transformed == 0 && self.files_skipped == 0 && self.files_failed == 0
    }
}
