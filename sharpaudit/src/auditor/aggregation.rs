//! Aggregation of per-file records into the final audit result.

use super::{AuditResult, AuditSummary, Auditor, FileMetrics, FileRecord, ScanWarning};
use crate::clones::detect_duplicates;
use crate::graph::DependencyGraph;
use crate::issues::classify;

impl Auditor {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn aggregate_results(
        &self,
        records: Vec<FileRecord>,
        warnings: Vec<ScanWarning>,
    ) -> AuditResult {
        let mut files = Vec::with_capacity(records.len());
        let mut file_lines = Vec::with_capacity(records.len());
        for record in records {
            files.push(record.metrics);
            file_lines.push(record.dup_lines);
        }

        let graph = DependencyGraph::build(&files, &self.std_prefixes);
        let cycles = graph.find_cycles();
        let duplicates = detect_duplicates(&file_lines, self.window);
        let issues = classify(&files, &graph, &duplicates, &self.thresholds);

        let total_loc: usize = files.iter().map(|f| f.loc).sum();
        let total_sloc: usize = files.iter().map(|f| f.sloc).sum();
        let method_count: usize = files.iter().map(FileMetrics::method_count).sum();
        let total_complexity: usize = files.iter().map(FileMetrics::total_complexity).sum();
        let max_complexity = files
            .iter()
            .flat_map(|f| f.methods.iter().map(|m| m.complexity))
            .max()
            .unwrap_or(0);
        let doc_ratio_sum: f64 = files.iter().map(FileMetrics::doc_ratio).sum();

        let file_count = files.len();
        let summary = AuditSummary {
            files: file_count,
            total_loc,
            total_sloc,
            avg_loc: if file_count > 0 {
                total_loc as f64 / file_count as f64
            } else {
                0.0
            },
            avg_sloc: if file_count > 0 {
                total_sloc as f64 / file_count as f64
            } else {
                0.0
            },
            avg_complexity: if method_count > 0 {
                total_complexity as f64 / method_count as f64
            } else {
                0.0
            },
            max_complexity,
            avg_doc_ratio: if file_count > 0 {
                doc_ratio_sum / file_count as f64
            } else {
                0.0
            },
            duplicate_fragments: duplicates.len(),
        };

        AuditResult {
            files,
            dependencies: graph.dependencies(),
            cycles,
            duplicates,
            issues,
            summary,
            warnings,
        }
    }
}
