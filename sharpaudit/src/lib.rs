//! sharpaudit: a deterministic audit tool for C# source trees.
//!
//! The pipeline reads every `.cs` file under a root, strips comments and
//! string literals with a line-preserving scrubber, extracts per-file and
//! per-method metrics, builds a namespace dependency graph with cycle
//! detection, hashes sliding windows of code lines to find cross-file
//! duplicates, and classifies the lot into prioritized issues. Identical
//! input trees produce byte-identical reports.
//!
//! The library surface is [`auditor::Auditor`] plus the result types it
//! returns; the `sharpaudit` binary is a thin wrapper over
//! [`entry_point::run_with_args`].

pub mod auditor;
pub mod cli;
pub mod clones;
pub mod config;
pub mod constants;
pub mod entry_point;
pub mod graph;
pub mod issues;
pub mod methods;
pub mod output;
pub mod scrub;
pub mod utils;

pub use auditor::{AuditResult, AuditSummary, Auditor, FileMetrics, ScanWarning};
pub use issues::{Category, Issue, Priority, Thresholds};
