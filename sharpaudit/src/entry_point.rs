//! Program entry: argument parsing, configuration, the audit itself and
//! report emission.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::auditor::{AuditResult, Auditor};
use crate::cli::Cli;
use crate::config::Config;
use crate::output;

/// Runs the audit with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if the audit or report emission fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the audit with the given arguments, writing output to the specified
/// writer. This is the testable version of `run_with_args`.
///
/// # Errors
///
/// Returns an error if the audit or report emission fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["sharpaudit".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    let config = Config::load_from_path(&cli.root);

    if cli.verbose && !cli.json {
        eprintln!("[VERBOSE] sharpaudit v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", path.display());
        }
    }

    let mut auditor = Auditor::new()
        .with_config(&config)
        .with_verbose(cli.verbose && !cli.json);
    if !cli.exclude_folders.is_empty() {
        auditor.exclude_folders.extend(cli.exclude_folders.iter().cloned());
    }
    if !cli.include_folders.is_empty() {
        auditor.include_folders.extend(cli.include_folders.iter().cloned());
    }
    if !cli.std_prefixes.is_empty() {
        auditor.std_prefixes.clone_from(&cli.std_prefixes);
    }
    if let Some(window) = cli.window {
        auditor.window = window;
    }
    if let Some(v) = cli.max_file_loc {
        auditor.thresholds.max_file_loc = v;
    }
    if let Some(v) = cli.max_complexity {
        auditor.thresholds.complexity_warn = v;
    }
    if let Some(v) = cli.max_method_lines {
        auditor.thresholds.method_lines_warn = v;
    }
    if let Some(v) = cli.max_parameters {
        auditor.thresholds.max_parameters = v;
    }
    if let Some(v) = cli.min_doc_ratio {
        auditor.thresholds.min_doc_ratio = v;
    }

    let show_progress = !cli.quiet && !cli.json;
    let progress_bar = if show_progress {
        let total = u64::try_from(auditor.count_files(&cli.root)).unwrap_or(u64::MAX);
        let bar = Arc::new(output::create_progress_bar(total));
        auditor = auditor.with_progress_bar(Arc::clone(&bar));
        Some(bar)
    } else {
        None
    };

    let result = auditor.audit(&cli.root);
    if let Some(bar) = progress_bar {
        bar.finish_and_clear();
    }
    let result = result?;

    if cli.json {
        write!(writer, "{}", output::render_json(&result)?)?;
    } else if !cli.quiet {
        output::print_header(writer)?;
        output::print_summary_pills(writer, &result)?;
        output::print_scan_stats(writer, &result)?;
        output::print_issues(writer, &result)?;
        output::print_warnings(writer, &result)?;
    }

    if !cli.no_report {
        write_reports(&result, &cli.root, &cli.output)?;
        if !cli.quiet && !cli.json {
            writeln!(writer, "\nReports written to {}", cli.output.display())?;
        }
    }

    if let Some(gate) = cli.fail_on {
        if result.issues.iter().any(|issue| issue.priority <= gate) {
            return Ok(1);
        }
    }
    Ok(0)
}

fn write_reports(result: &AuditResult, root: &Path, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let root_label = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(".")
        .to_owned();

    let markdown = output::render_markdown(result, &root_label);
    let markdown_path = output_dir.join("audit_report.md");
    fs::write(&markdown_path, markdown)
        .with_context(|| format!("failed to write {}", markdown_path.display()))?;

    let json = output::render_json(result)?;
    let json_path = output_dir.join("audit_report.json");
    fs::write(&json_path, json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    Ok(())
}
