use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::auditor::AuditResult;
use crate::issues::Priority;

fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);

    if cfg!(test) {
        table.set_width(120);
    }
    table
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::P0 => Color::Red,
        Priority::P1 => Color::Yellow,
        Priority::P2 => Color::Blue,
        Priority::P3 => Color::White,
    }
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  C# Repository Audit Results           ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print per-priority issue counts as colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(writer: &mut impl Write, result: &AuditResult) -> std::io::Result<()> {
    fn pill(label: &str, count: usize) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().green())
        } else {
            format!("{}: {}", label, count.to_string().red().bold())
        }
    }

    let count_at = |p: Priority| result.issues.iter().filter(|i| i.priority == p).count();

    writeln!(
        writer,
        "{}  {}  {}  {}  {}",
        pill("P0", count_at(Priority::P0)),
        pill("P1", count_at(Priority::P1)),
        pill("P2", count_at(Priority::P2)),
        pill("P3", count_at(Priority::P3)),
        pill("Cycles", result.cycles.len()),
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print scan statistics.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_scan_stats(writer: &mut impl Write, result: &AuditResult) -> std::io::Result<()> {
    let s = &result.summary;
    writeln!(
        writer,
        "{}",
        format!(
            "Audited {} files ({} lines)",
            s.files.to_string().bold(),
            s.total_loc.to_string().bold()
        )
        .dimmed()
    )?;

    let complexity_color = if s.avg_complexity > 10.0 {
        colored::Color::Red
    } else {
        colored::Color::Green
    };
    writeln!(
        writer,
        "Average Complexity: {} | Max: {} | Doc ratio: {}",
        format!("{:.2}", s.avg_complexity)
            .color(complexity_color)
            .bold(),
        s.max_complexity.to_string().bold(),
        format!("{:.1}%", s.avg_doc_ratio * 100.0).bold()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print the issue table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_issues(writer: &mut impl Write, result: &AuditResult) -> std::io::Result<()> {
    if result.issues.is_empty() {
        writeln!(writer, "{}", "[OK] No issues found.".green().bold())?;
        return Ok(());
    }

    writeln!(writer, "{}", "Issues".bold().underline())?;
    let mut table = create_table(vec!["Priority", "Category", "Description"]);
    for issue in &result.issues {
        table.add_row(vec![
            Cell::new(issue.priority.as_str()).fg(priority_color(issue.priority)),
            Cell::new(issue.category.as_str()).add_attribute(Attribute::Dim),
            Cell::new(&issue.message),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the list of files skipped with warnings.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_warnings(writer: &mut impl Write, result: &AuditResult) -> std::io::Result<()> {
    if result.warnings.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{}", "Skipped Files".bold().underline())?;
    for warning in &result.warnings {
        writeln!(
            writer,
            "{} {}: {}",
            "[WARN]".yellow(),
            warning.file,
            warning.error.dimmed()
        )?;
    }
    Ok(())
}

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("auditing...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick();
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::AuditSummary;
    use crate::issues::{Category, Issue};
    use std::collections::BTreeMap;

    fn result_with_issues(issues: Vec<Issue>) -> AuditResult {
        AuditResult {
            files: Vec::new(),
            dependencies: BTreeMap::new(),
            cycles: Vec::new(),
            duplicates: Vec::new(),
            issues,
            summary: AuditSummary::default(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn clean_result_prints_ok() {
        let mut buf = Vec::new();
        print_issues(&mut buf, &result_with_issues(Vec::new())).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("No issues found"));
    }

    #[test]
    fn issue_table_lists_messages() {
        let issues = vec![Issue {
            priority: Priority::P1,
            category: Category::LargeFile,
            message: "Core/Big.cs: 900 lines (max 400)".to_owned(),
        }];
        let mut buf = Vec::new();
        print_issues(&mut buf, &result_with_issues(issues)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Core/Big.cs"));
        assert!(text.contains("LargeFile"));
    }
}
