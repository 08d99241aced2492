//! Single file measurement logic.

use std::fs;
use std::path::Path;

use super::{Auditor, FileMetrics, FileRecord, ScanWarning};
use crate::clones::FileLines;
use crate::constants::{get_namespace_re, get_type_re, get_using_re};
use crate::methods::scan_methods;
use crate::scrub::{scrub, LineKind};
use crate::utils::{normalize_display_path, LineIndex};

impl Auditor {
    /// Reads and measures one file. Unreadable files become warnings so a
    /// single bad file never sinks the whole scan.
    pub(crate) fn process_single_file(
        &self,
        file_path: &Path,
        root_path: &Path,
    ) -> Result<FileRecord, ScanWarning> {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }

        let relative = file_path.strip_prefix(root_path).unwrap_or(file_path);
        let display_path = normalize_display_path(relative);

        let source = match fs::read_to_string(file_path) {
            Ok(code) => code,
            Err(e) => {
                return Err(ScanWarning {
                    file: display_path,
                    error: format!("failed to read file: {e}"),
                });
            }
        };

        if self.verbose {
            eprintln!("[scan] {display_path}");
        }

        let scrubbed = scrub(&source);
        // Method offsets point into the scrubbed text, so the index must be
        // built over it; scrubbing collapses multi-byte characters to single
        // spaces and the original's byte positions no longer line up.
        let index = LineIndex::new(&scrubbed.text);

        let loc = scrubbed.line_kinds.len();
        let sloc = scrubbed
            .line_kinds
            .iter()
            .filter(|k| !matches!(k, LineKind::Blank))
            .count();
        let comment_lines = scrubbed
            .line_kinds
            .iter()
            .filter(|k| matches!(k, LineKind::Comment))
            .count();

        let namespace = get_namespace_re()
            .captures(&scrubbed.text)
            .map(|c| c[1].to_owned());

        let mut usings = Vec::new();
        for captures in get_using_re().captures_iter(&scrubbed.text) {
            let name = captures[1].to_owned();
            if !usings.contains(&name) {
                usings.push(name);
            }
        }

        let types = get_type_re()
            .captures_iter(&scrubbed.text)
            .map(|c| c[1].to_owned())
            .collect();

        let methods = scan_methods(&source, &scrubbed.text, &index);

        // Duplicate detection hashes raw code lines: comments and blanks
        // are skipped, but string literals stay distinct.
        let mut dup_lines = Vec::new();
        for (i, (raw, kind)) in source.lines().zip(&scrubbed.line_kinds).enumerate() {
            if matches!(kind, LineKind::Code) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    dup_lines.push((i + 1, trimmed.to_owned()));
                }
            }
        }

        let metrics = FileMetrics {
            path: display_path.clone(),
            namespace,
            usings,
            types,
            loc,
            sloc,
            comment_lines,
            doc_lines: scrubbed.doc_lines,
            methods,
        };

        Ok(FileRecord {
            metrics,
            dup_lines: FileLines {
                path: display_path,
                lines: dup_lines,
            },
        })
    }
}
