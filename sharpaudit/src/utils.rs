//! Path handling and source file discovery.

use crate::constants::{get_default_exclude_folders, SOURCE_EXTENSION};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// A utility struct to convert byte offsets to line numbers.
///
/// The scanners work with byte offsets into the scrubbed text; findings are
/// reported with 1-indexed line numbers, which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // Newlines are always single bytes in UTF-8, so byte iteration is safe.
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Normalizes a path for display and for stable cross-platform output.
///
/// - Converts backslashes to forward slashes
/// - Strips a leading "./" prefix
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Builds a `GlobSet` from user exclude patterns; bare names are matched as
/// path components.
fn build_exclude_globs(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = if pattern.contains('/') || pattern.contains('*') {
            Glob::new(pattern)
        } else {
            Glob::new(&format!("**/{pattern}/**"))
        };
        if let Ok(g) = glob {
            builder.add(g);
        }
    }
    builder.build().ok()
}

/// Recursively collects C# source files under `root`, respecting .gitignore,
/// default folder exclusions and user-supplied patterns. The result is sorted
/// by path so every downstream computation is deterministic.
#[must_use]
pub fn collect_source_files(
    root: &Path,
    exclude_folders: &[String],
    include_folders: &[String],
) -> Vec<PathBuf> {
    let default_excludes: FxHashSet<&str> = get_default_exclude_folders()
        .iter()
        .copied()
        .filter(|name| !include_folders.iter().any(|inc| inc == name))
        .collect();
    let user_globs = build_exclude_globs(exclude_folders);

    let mut files = Vec::new();
    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .sort_by_file_path(std::cmp::Ord::cmp)
        .filter_entry(move |entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !default_excludes.contains(name))
        })
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
            continue;
        }
        if let Some(ref globs) = user_globs {
            let relative = path.strip_prefix(root).unwrap_or(path);
            if globs.is_match(relative) {
                continue;
            }
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn line_index_maps_offsets() {
        let index = LineIndex::new("ab\ncd\nef");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 1);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(6), 3);
    }

    #[test]
    fn collects_only_cs_files_sorted() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.cs"), "class B {}")?;
        fs::write(dir.path().join("a.cs"), "class A {}")?;
        fs::write(dir.path().join("notes.txt"), "not code")?;
        fs::create_dir(dir.path().join("obj"))?;
        fs::write(dir.path().join("obj").join("gen.cs"), "class G {}")?;

        let files = collect_source_files(dir.path(), &[], &[]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.cs", "b.cs"]);
        Ok(())
    }

    #[test]
    fn user_excludes_filter_by_folder_name() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("generated"))?;
        fs::write(dir.path().join("generated").join("x.cs"), "class X {}")?;
        fs::write(dir.path().join("main.cs"), "class M {}")?;

        let files = collect_source_files(dir.path(), &["generated".to_owned()], &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.cs"));
        Ok(())
    }
}
