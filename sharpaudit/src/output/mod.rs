//! Report rendering: console, Markdown and JSON, all driven by
//! `AuditResult` alone.

mod console;
mod json;
mod markdown;
mod tree;

pub use console::{
    create_progress_bar, print_header, print_issues, print_scan_stats, print_summary_pills,
    print_warnings,
};
pub use json::render_json;
pub use markdown::render_markdown;
pub use tree::render_tree;
