//! The audit engine: walks a source tree, measures every file, then
//! aggregates metrics into a dependency graph, duplicate fragments and
//! classified issues.

mod aggregation;
mod single_file;

/// Result types and audit summaries.
pub mod types;

pub use types::{AuditResult, AuditSummary, FileMetrics, ScanWarning};

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::clones::FileLines;
use crate::config::Config;
use crate::constants::{DEFAULT_STD_PREFIX, DUPLICATE_WINDOW};
use crate::issues::Thresholds;
use crate::utils::collect_source_files;

pub(crate) struct FileRecord {
    pub(crate) metrics: FileMetrics,
    pub(crate) dup_lines: FileLines,
}

/// Audit state and runtime configuration.
pub struct Auditor {
    /// Classification thresholds.
    pub thresholds: Thresholds,
    /// Namespace prefixes excluded from the dependency graph.
    pub std_prefixes: Vec<String>,
    /// Sliding-window size for duplicate detection.
    pub window: usize,
    /// Folders to exclude from the scan.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Whether to log per-file progress to stderr.
    pub verbose: bool,
    /// Progress bar for tracking scan progress (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
}

impl Default for Auditor {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            std_prefixes: vec![DEFAULT_STD_PREFIX.to_owned()],
            window: DUPLICATE_WINDOW,
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            verbose: false,
            progress_bar: None,
        }
    }
}

impl Auditor {
    /// Creates an auditor with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to apply file-based configuration. CLI flags
    /// applied afterwards take precedence over anything set here.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        let c = &config.sharpaudit;
        if let Some(folders) = &c.exclude_folders {
            self.exclude_folders.clone_from(folders);
        }
        if let Some(folders) = &c.include_folders {
            self.include_folders.clone_from(folders);
        }
        if let Some(prefixes) = &c.std_prefixes {
            self.std_prefixes.clone_from(prefixes);
        }
        if let Some(window) = c.window {
            self.window = window;
        }
        let t = &mut self.thresholds;
        if let Some(v) = c.max_file_loc {
            t.max_file_loc = v;
        }
        if let Some(v) = c.max_file_methods {
            t.max_file_methods = v;
        }
        if let Some(v) = c.max_complexity {
            t.complexity_warn = v;
        }
        if let Some(v) = c.severe_complexity {
            t.complexity_severe = v;
        }
        if let Some(v) = c.max_method_lines {
            t.method_lines_warn = v;
        }
        if let Some(v) = c.severe_method_lines {
            t.method_lines_severe = v;
        }
        if let Some(v) = c.max_parameters {
            t.max_parameters = v;
        }
        if let Some(v) = c.min_doc_ratio {
            t.min_doc_ratio = v;
        }
        if let Some(v) = c.max_fan_out {
            t.max_fan_out = v;
        }
        if let Some(v) = c.max_fan_in {
            t.max_fan_in = v;
        }
        self
    }

    /// Builder-style method to set classification thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Builder-style method to set the duplicate-detection window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Builder-style method to set excluded namespace prefixes.
    #[must_use]
    pub fn with_std_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.std_prefixes = prefixes;
        self
    }

    /// Builder-style method to set excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders = folders;
        self
    }

    /// Builder-style method to set included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: Vec<String>) -> Self {
        self.include_folders = folders;
        self
    }

    /// Builder-style method to set verbose mode.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress_bar(mut self, bar: std::sync::Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(bar);
        self
    }

    /// Counts the source files a scan of `root` would cover. Useful for
    /// sizing a progress bar before the audit starts.
    #[must_use]
    pub fn count_files(&self, root: &Path) -> usize {
        collect_source_files(root, &self.exclude_folders, &self.include_folders).len()
    }

    /// Runs the full audit over `root`.
    ///
    /// # Errors
    ///
    /// Fails when `root` does not exist or is not a directory, or when the
    /// scan finds no source files at all. Individual unreadable files do
    /// not fail the audit; they are recorded as warnings in the result.
    pub fn audit(&self, root: &Path) -> Result<AuditResult> {
        if !root.exists() {
            bail!("path does not exist: {}", root.display());
        }
        if !root.is_dir() {
            bail!("path is not a directory: {}", root.display());
        }

        let files = collect_source_files(root, &self.exclude_folders, &self.include_folders);
        self.audit_files(root, &files)
    }

    /// Audits the files below `root` directly, without filesystem discovery.
    /// Used by tests and embedders that already hold a file list.
    pub fn audit_files(&self, root: &Path, files: &[PathBuf]) -> Result<AuditResult> {
        if files.is_empty() {
            bail!("no C# source files found under {}", root.display());
        }
        let outcomes: Vec<Result<FileRecord, ScanWarning>> = files
            .par_iter()
            .map(|path| self.process_single_file(path, root))
            .collect();

        let mut records = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(warning) => warnings.push(warning),
            }
        }
        Ok(self.aggregate_results(records, warnings))
    }
}
