//! Cross-file duplicate fragment detection.
//!
//! A fixed-size window slides over each file's normalized lines (code lines
//! only, right-trimmed, blank and comment lines dropped) and every window is
//! content-hashed. Hash groups whose occurrences span at least two distinct
//! files are reported; a fragment repeated only within one file is not.
//! Line-based windowing keeps the detector simple and language-agnostic at
//! the cost of missing duplicates that differ only in formatting.

use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;
use std::hash::Hasher;

/// A single place a duplicated fragment occurs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Occurrence {
    /// Relative file path.
    pub file: String,
    /// 1-indexed original line where the window starts.
    pub start_line: usize,
}

/// A duplicated fragment, identified by the content hash of its window.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateFragment {
    /// Content hash of the joined window, as a fixed-width hex string.
    pub hash: String,
    /// The window's literal (normalized) lines.
    pub lines: Vec<String>,
    /// All occurrences, in file-scan order. Always spans >= 2 files.
    pub occurrences: Vec<Occurrence>,
}

/// Normalized duplicate-detection input for one file: code lines paired with
/// their original line numbers.
#[derive(Debug, Default)]
pub struct FileLines {
    /// Relative file path.
    pub path: String,
    /// (original 1-indexed line number, right-trimmed text) per code line.
    pub lines: Vec<(usize, String)>,
}

/// Detects duplicate fragments across all files. Files shorter than the
/// window produce no windows. Output is ordered by first occurrence so runs
/// over identical input are byte-identical.
#[must_use]
pub fn detect_duplicates(files: &[FileLines], window: usize) -> Vec<DuplicateFragment> {
    if window == 0 {
        return Vec::new();
    }

    struct Group<'a> {
        lines: Vec<&'a str>,
        occurrences: Vec<Occurrence>,
        distinct_files: usize,
        last_file: Option<&'a str>,
    }

    let mut groups: FxHashMap<u64, Group<'_>> = FxHashMap::default();

    for file in files {
        if file.lines.len() < window {
            continue;
        }
        for chunk in file.lines.windows(window) {
            let digest = hash_window(chunk);
            let group = groups.entry(digest).or_insert_with(|| Group {
                lines: chunk.iter().map(|(_, text)| text.as_str()).collect(),
                occurrences: Vec::new(),
                distinct_files: 0,
                last_file: None,
            });
            if group.last_file != Some(file.path.as_str()) {
                group.distinct_files += 1;
                group.last_file = Some(file.path.as_str());
            }
            group.occurrences.push(Occurrence {
                file: file.path.clone(),
                start_line: chunk[0].0,
            });
        }
    }

    let mut fragments: Vec<DuplicateFragment> = groups
        .into_iter()
        .filter(|(_, group)| group.distinct_files > 1)
        .map(|(digest, group)| {
            let mut occurrences = group.occurrences;
            occurrences.sort();
            DuplicateFragment {
                hash: format!("{digest:016x}"),
                lines: group.lines.iter().map(|&l| l.to_owned()).collect(),
                occurrences,
            }
        })
        .collect();

    fragments.sort_by(|a, b| a.occurrences[0].cmp(&b.occurrences[0]));
    fragments
}

fn hash_window(chunk: &[(usize, String)]) -> u64 {
    let mut hasher = FxHasher::default();
    for (_, text) in chunk {
        hasher.write(text.as_bytes());
        hasher.write_u8(b'\n');
    }
    hasher.finish()
}

impl PartialOrd for Occurrence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Occurrence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.file
            .cmp(&other.file)
            .then(self.start_line.cmp(&other.start_line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_lines(path: &str, start: usize, lines: &[&str]) -> FileLines {
        FileLines {
            path: path.to_owned(),
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, &text)| (start + i, text.to_owned()))
                .collect(),
        }
    }

    const BLOCK: [&str; 8] = [
        "var total = 0;",
        "foreach (var item in items)",
        "{",
        "    total += item.Value;",
        "}",
        "if (total > limit)",
        "{",
        "    throw new InvalidOperationException();",
    ];

    #[test]
    fn identical_block_in_two_files_reported_once() {
        let files = [file_lines("a.cs", 10, &BLOCK), file_lines("b.cs", 42, &BLOCK)];
        let fragments = detect_duplicates(&files, 8);
        assert_eq!(fragments.len(), 1);
        let fragment = &fragments[0];
        assert_eq!(fragment.occurrences.len(), 2);
        assert_eq!(
            fragment.occurrences[0],
            Occurrence {
                file: "a.cs".to_owned(),
                start_line: 10
            }
        );
        assert_eq!(fragment.occurrences[1].start_line, 42);
        assert_eq!(fragment.lines.len(), 8);
    }

    #[test]
    fn repeat_within_single_file_not_reported() {
        let mut lines: Vec<&str> = BLOCK.to_vec();
        lines.push("// spacer");
        lines.extend_from_slice(&BLOCK);
        let files = [file_lines("only.cs", 1, &lines)];
        assert!(detect_duplicates(&files, 8).is_empty());
    }

    #[test]
    fn file_shorter_than_window_produces_no_windows() {
        let files = [
            file_lines("short.cs", 1, &["a();", "b();"]),
            file_lines("short2.cs", 1, &["a();", "b();"]),
        ];
        assert!(detect_duplicates(&files, 5).is_empty());
    }

    #[test]
    fn occurrences_grouped_symmetrically() {
        let files = [
            file_lines("x.cs", 1, &BLOCK),
            file_lines("y.cs", 1, &BLOCK),
            file_lines("z.cs", 1, &BLOCK),
        ];
        let fragments = detect_duplicates(&files, 8);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].occurrences.len(), 3);
    }

    #[test]
    fn differing_windows_do_not_collide() {
        let other: Vec<&str> = BLOCK.iter().rev().copied().collect();
        let files = [file_lines("a.cs", 1, &BLOCK), file_lines("b.cs", 1, &other)];
        assert!(detect_duplicates(&files, 8).is_empty());
    }

    #[test]
    fn deterministic_output_order() {
        let files = [
            file_lines("b.cs", 5, &BLOCK),
            file_lines("a.cs", 9, &BLOCK),
        ];
        let fragments = detect_duplicates(&files, 8);
        // Sorted by first occurrence, which itself sorts by path.
        assert_eq!(fragments[0].occurrences[0].file, "a.cs");
    }
}
