//! Result types produced by an audit.

use crate::clones::DuplicateFragment;
use crate::issues::Issue;
use crate::methods::MethodRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-file metrics, immutable once computed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileMetrics {
    /// Path relative to the audit root, `/`-separated.
    pub path: String,
    /// First declared namespace, if any.
    pub namespace: Option<String>,
    /// Imported namespaces, in declaration order.
    pub usings: Vec<String>,
    /// Declared type names, in declaration order.
    pub types: Vec<String>,
    /// Total physical lines.
    pub loc: usize,
    /// Non-blank lines.
    pub sloc: usize,
    /// Lines that are purely comments.
    pub comment_lines: usize,
    /// Lines starting with the `///` doc marker.
    pub doc_lines: usize,
    /// Extracted methods, in source order.
    pub methods: Vec<MethodRecord>,
}

impl FileMetrics {
    /// Number of extracted methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Sum of method complexity estimates.
    #[must_use]
    pub fn total_complexity(&self) -> usize {
        self.methods.iter().map(|m| m.complexity).sum()
    }

    /// Documentation density: doc lines over total lines, 0 for empty files.
    #[must_use]
    pub fn doc_ratio(&self) -> f64 {
        if self.loc == 0 {
            0.0
        } else {
            self.doc_lines as f64 / self.loc as f64
        }
    }
}

/// A file that could not be analyzed; the scan continues without it.
#[derive(Debug, Clone, Serialize)]
pub struct ScanWarning {
    /// Relative path of the skipped file.
    pub file: String,
    /// Why it was skipped.
    pub error: String,
}

/// Whole-scan aggregates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    /// Number of files analyzed.
    pub files: usize,
    /// Sum of LOC across files.
    pub total_loc: usize,
    /// Sum of SLOC across files.
    pub total_sloc: usize,
    /// Mean LOC per file.
    pub avg_loc: f64,
    /// Mean SLOC per file.
    pub avg_sloc: f64,
    /// Mean method complexity across all methods.
    pub avg_complexity: f64,
    /// Highest single-method complexity.
    pub max_complexity: usize,
    /// Mean per-file documentation ratio.
    pub avg_doc_ratio: f64,
    /// Number of cross-file duplicate fragments.
    pub duplicate_fragments: usize,
}

/// Everything a single audit produced. This is the engine's whole contract
/// with reporting: Markdown, JSON and quality gates all consume this shape.
#[derive(Debug, Serialize)]
pub struct AuditResult {
    /// Per-file metrics, sorted by path.
    pub files: Vec<FileMetrics>,
    /// Namespace → sorted referenced namespaces.
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// Dependency cycles, each a closed namespace path.
    pub cycles: Vec<Vec<String>>,
    /// Cross-file duplicate fragments.
    pub duplicates: Vec<DuplicateFragment>,
    /// Classified findings, ordered by priority.
    pub issues: Vec<Issue>,
    /// Whole-scan aggregates.
    pub summary: AuditSummary,
    /// Files skipped with a recorded reason.
    pub warnings: Vec<ScanWarning>,
}
