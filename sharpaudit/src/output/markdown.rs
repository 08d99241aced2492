//! Markdown audit report, rendered from `AuditResult` alone so identical
//! scans produce byte-identical reports.

use std::fmt::Write as _;

use crate::auditor::AuditResult;
use crate::output::tree::render_tree;

const MAX_DUPLICATES_SHOWN: usize = 10;

/// Renders the full Markdown report. `root_label` heads the directory tree.
#[must_use]
pub fn render_markdown(result: &AuditResult, root_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Code Audit Report\n\n");

    write_overview(&mut out, result);
    write_layout(&mut out, result, root_label);
    write_dependencies(&mut out, result);
    write_issues(&mut out, result);
    write_files(&mut out, result);
    write_duplicates(&mut out, result);
    write_warnings(&mut out, result);

    out
}

fn write_overview(out: &mut String, result: &AuditResult) {
    let s = &result.summary;
    out.push_str("## Overview\n\n");
    out.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Files | {} |", s.files);
    let _ = writeln!(out, "| Total LOC | {} |", s.total_loc);
    let _ = writeln!(out, "| Total SLOC | {} |", s.total_sloc);
    let _ = writeln!(out, "| Average LOC per file | {:.1} |", s.avg_loc);
    let _ = writeln!(out, "| Average SLOC per file | {:.1} |", s.avg_sloc);
    let _ = writeln!(out, "| Average complexity | {:.2} |", s.avg_complexity);
    let _ = writeln!(out, "| Max complexity | {} |", s.max_complexity);
    let _ = writeln!(out, "| Average doc ratio | {:.1}% |", s.avg_doc_ratio * 100.0);
    let _ = writeln!(out, "| Duplicate fragments | {} |", s.duplicate_fragments);
    let _ = writeln!(out, "| Issues | {} |", result.issues.len());
    out.push('\n');
}

fn write_layout(out: &mut String, result: &AuditResult, root_label: &str) {
    out.push_str("## Repository Layout\n\n```\n");
    let paths: Vec<&str> = result.files.iter().map(|f| f.path.as_str()).collect();
    out.push_str(&render_tree(root_label, &paths));
    out.push_str("```\n\n");
}

fn write_dependencies(out: &mut String, result: &AuditResult) {
    if result.dependencies.is_empty() {
        return;
    }
    out.push_str("## Namespace Dependencies\n\n");
    for (namespace, deps) in &result.dependencies {
        if deps.is_empty() {
            let _ = writeln!(out, "- `{namespace}` (no project dependencies)");
        } else {
            let formatted: Vec<String> = deps.iter().map(|d| format!("`{d}`")).collect();
            let _ = writeln!(out, "- `{namespace}` -> {}", formatted.join(", "));
        }
    }
    out.push('\n');

    if !result.cycles.is_empty() {
        out.push_str("### Dependency Cycles\n\n");
        for cycle in &result.cycles {
            let _ = writeln!(out, "- {}", cycle.join(" -> "));
        }
        out.push('\n');
    }
}

fn write_issues(out: &mut String, result: &AuditResult) {
    out.push_str("## Issues\n\n");
    if result.issues.is_empty() {
        out.push_str("No issues found.\n\n");
        return;
    }
    out.push_str("| Priority | Category | Description |\n|---|---|---|\n");
    for issue in &result.issues {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            issue.priority, issue.category, issue.message
        );
    }
    out.push('\n');
}

fn write_files(out: &mut String, result: &AuditResult) {
    out.push_str("## Files\n\n");
    for file in &result.files {
        let _ = writeln!(out, "### `{}`", file.path);
        out.push('\n');
        let namespace = file.namespace.as_deref().unwrap_or("(none)");
        let _ = writeln!(
            out,
            "Namespace: `{namespace}` | LOC: {} | SLOC: {} | doc ratio: {:.1}%",
            file.loc,
            file.sloc,
            file.doc_ratio() * 100.0
        );
        out.push('\n');

        if file.methods.is_empty() {
            out.push_str("No methods detected.\n\n");
            continue;
        }
        out.push_str("| Method | Lines | Complexity | Params | Depth | Doc |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for method in &file.methods {
            let _ = writeln!(
                out,
                "| `{}` | {}-{} ({}) | {} | {} | {} | {} |",
                method.name,
                method.start_line,
                method.end_line,
                method.length,
                method.complexity,
                method.parameters,
                method.nesting_depth,
                if method.doc_present { "yes" } else { "no" }
            );
        }
        out.push('\n');
    }
}

fn write_duplicates(out: &mut String, result: &AuditResult) {
    if result.duplicates.is_empty() {
        return;
    }
    out.push_str("## Duplicate Fragments\n\n");
    let shown = result.duplicates.len().min(MAX_DUPLICATES_SHOWN);
    if result.duplicates.len() > shown {
        let _ = writeln!(
            out,
            "Showing {shown} of {} fragments.",
            result.duplicates.len()
        );
        out.push('\n');
    }
    for fragment in result.duplicates.iter().take(MAX_DUPLICATES_SHOWN) {
        let _ = writeln!(out, "### Fragment `{}`", fragment.hash);
        out.push('\n');
        for occurrence in &fragment.occurrences {
            let _ = writeln!(out, "- `{}` line {}", occurrence.file, occurrence.start_line);
        }
        out.push('\n');
        out.push_str("```csharp\n");
        for line in &fragment.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("```\n\n");
    }
}

fn write_warnings(out: &mut String, result: &AuditResult) {
    if result.warnings.is_empty() {
        return;
    }
    out.push_str("## Skipped Files\n\n");
    for warning in &result.warnings {
        let _ = writeln!(out, "- `{}`: {}", warning.file, warning.error);
    }
    out.push('\n');
}
