//! Turns raw metrics into prioritized findings.

use crate::auditor::FileMetrics;
use crate::clones::DuplicateFragment;
use crate::constants::{
    COMPLEXITY_SEVERE, COMPLEXITY_WARN, MAX_FAN_IN, MAX_FAN_OUT, MAX_FILE_LOC, MAX_FILE_METHODS,
    MAX_PARAMETERS, METHOD_LINES_SEVERE, METHOD_LINES_WARN, MIN_DOC_RATIO, MIN_DOC_RATIO_FILE_LOC,
};
use crate::graph::DependencyGraph;
use serde::Serialize;

/// Finding priority. `P0` is most urgent; the derived ordering follows
/// declaration order so sorting puts `P0` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    /// Must fix: cycles, severe complexity.
    P0,
    /// Should fix soon.
    P1,
    /// Worth fixing.
    P2,
    /// Informational.
    P3,
}

impl Priority {
    /// Stable display form (`"P0"` .. `"P3"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "P0" => Ok(Priority::P0),
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            "P3" => Ok(Priority::P3),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of problem a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Namespace dependency cycle.
    Cycle,
    /// Method cyclomatic complexity over threshold.
    Complexity,
    /// Namespace fan-out or fan-in over threshold.
    Coupling,
    /// Cross-file duplicated fragment.
    Duplication,
    /// File too long or holding too many methods.
    LargeFile,
    /// Method body too long.
    MethodLength,
    /// Too many method parameters.
    ParameterCount,
    /// Doc-comment ratio under threshold.
    Documentation,
}

impl Category {
    /// Stable display form, matching the variant name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cycle => "Cycle",
            Category::Complexity => "Complexity",
            Category::Coupling => "Coupling",
            Category::Duplication => "Duplication",
            Category::LargeFile => "LargeFile",
            Category::MethodLength => "MethodLength",
            Category::ParameterCount => "ParameterCount",
            Category::Documentation => "Documentation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single classified finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// How urgent the finding is.
    pub priority: Priority,
    /// What kind of problem it describes.
    pub category: Category,
    /// Human-readable description with file and line context.
    pub message: String,
}

impl Issue {
    fn new(priority: Priority, category: Category, message: String) -> Self {
        Self { priority, category, message }
    }
}

/// Classification thresholds. Defaults mirror the named limits; config and
/// CLI flags override individual fields.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Files above this LOC count are flagged.
    pub max_file_loc: usize,
    /// Files with more methods than this are flagged.
    pub max_file_methods: usize,
    /// Complexity above this is a P1 finding.
    pub complexity_warn: usize,
    /// Complexity above this is a P0 finding.
    pub complexity_severe: usize,
    /// Method length above this is a P2 finding.
    pub method_lines_warn: usize,
    /// Method length above this is a P1 finding.
    pub method_lines_severe: usize,
    /// Methods with more parameters than this are flagged.
    pub max_parameters: usize,
    /// Files with a doc ratio below this are flagged.
    pub min_doc_ratio: f64,
    /// Doc-ratio findings only apply to files at least this long.
    pub min_doc_ratio_file_loc: usize,
    /// Max outgoing namespace dependencies before a coupling finding.
    pub max_fan_out: usize,
    /// Max incoming namespace dependencies before a coupling finding.
    pub max_fan_in: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_file_loc: MAX_FILE_LOC,
            max_file_methods: MAX_FILE_METHODS,
            complexity_warn: COMPLEXITY_WARN,
            complexity_severe: COMPLEXITY_SEVERE,
            method_lines_warn: METHOD_LINES_WARN,
            method_lines_severe: METHOD_LINES_SEVERE,
            max_parameters: MAX_PARAMETERS,
            min_doc_ratio: MIN_DOC_RATIO,
            min_doc_ratio_file_loc: MIN_DOC_RATIO_FILE_LOC,
            max_fan_out: MAX_FAN_OUT,
            max_fan_in: MAX_FAN_IN,
        }
    }
}

/// Classifies metrics, graph structure and duplicates into issues, sorted by
/// priority, then category, then message. Pure: same inputs, same output.
#[must_use]
pub fn classify(
    files: &[FileMetrics],
    graph: &DependencyGraph,
    duplicates: &[DuplicateFragment],
    thresholds: &Thresholds,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for file in files {
        classify_file(file, thresholds, &mut issues);
    }

    for cycle in graph.find_cycles() {
        issues.push(Issue::new(
            Priority::P0,
            Category::Cycle,
            format!("Namespace dependency cycle: {}", cycle.join(" -> ")),
        ));
    }

    for name in graph.node_names() {
        let fan_out = graph.fan_out(name);
        if fan_out > thresholds.max_fan_out {
            issues.push(Issue::new(
                Priority::P1,
                Category::Coupling,
                format!("{name}: depends on {fan_out} namespaces (max {})", thresholds.max_fan_out),
            ));
        }
        let fan_in = graph.fan_in(name);
        if fan_in > thresholds.max_fan_in {
            issues.push(Issue::new(
                Priority::P1,
                Category::Coupling,
                format!("{name}: depended on by {fan_in} namespaces (max {})", thresholds.max_fan_in),
            ));
        }
    }

    for fragment in duplicates {
        let locations: Vec<String> = fragment
            .occurrences
            .iter()
            .map(|o| format!("{}:{}", o.file, o.start_line))
            .collect();
        issues.push(Issue::new(
            Priority::P1,
            Category::Duplication,
            format!(
                "{} duplicated lines at {}",
                fragment.lines.len(),
                locations.join(", ")
            ),
        ));
    }

    issues.sort_by(|a, b| {
        (a.priority, a.category, a.message.as_str())
            .cmp(&(b.priority, b.category, b.message.as_str()))
    });
    issues
}

fn classify_file(file: &FileMetrics, thresholds: &Thresholds, issues: &mut Vec<Issue>) {
    if file.loc > thresholds.max_file_loc {
        issues.push(Issue::new(
            Priority::P1,
            Category::LargeFile,
            format!("{}: {} lines (max {})", file.path, file.loc, thresholds.max_file_loc),
        ));
    }
    if file.method_count() > thresholds.max_file_methods {
        issues.push(Issue::new(
            Priority::P1,
            Category::LargeFile,
            format!(
                "{}: {} methods (max {})",
                file.path,
                file.method_count(),
                thresholds.max_file_methods
            ),
        ));
    }
    if file.loc >= thresholds.min_doc_ratio_file_loc && file.doc_ratio() < thresholds.min_doc_ratio
    {
        issues.push(Issue::new(
            Priority::P2,
            Category::Documentation,
            format!(
                "{}: doc ratio {:.1}% (min {:.1}%)",
                file.path,
                file.doc_ratio() * 100.0,
                thresholds.min_doc_ratio * 100.0
            ),
        ));
    }

    let public_methods = file.methods.iter().filter(|m| m.is_public).count();
    let undocumented = file
        .methods
        .iter()
        .filter(|m| m.is_public && !m.doc_present)
        .count();
    if undocumented > 0 {
        issues.push(Issue::new(
            Priority::P2,
            Category::Documentation,
            format!(
                "{}: {undocumented}/{public_methods} public methods undocumented",
                file.path
            ),
        ));
    }

    for method in &file.methods {
        if method.complexity > thresholds.complexity_severe {
            issues.push(Issue::new(
                Priority::P0,
                Category::Complexity,
                format!(
                    "{}:{} {}: complexity {} (max {})",
                    file.path,
                    method.start_line,
                    method.name,
                    method.complexity,
                    thresholds.complexity_severe
                ),
            ));
        } else if method.complexity > thresholds.complexity_warn {
            issues.push(Issue::new(
                Priority::P1,
                Category::Complexity,
                format!(
                    "{}:{} {}: complexity {} (max {})",
                    file.path,
                    method.start_line,
                    method.name,
                    method.complexity,
                    thresholds.complexity_warn
                ),
            ));
        }

        if method.length > thresholds.method_lines_severe {
            issues.push(Issue::new(
                Priority::P1,
                Category::MethodLength,
                format!(
                    "{}:{} {}: {} lines (max {})",
                    file.path,
                    method.start_line,
                    method.name,
                    method.length,
                    thresholds.method_lines_severe
                ),
            ));
        } else if method.length > thresholds.method_lines_warn {
            issues.push(Issue::new(
                Priority::P2,
                Category::MethodLength,
                format!(
                    "{}:{} {}: {} lines (max {})",
                    file.path,
                    method.start_line,
                    method.name,
                    method.length,
                    thresholds.method_lines_warn
                ),
            ));
        }

        if method.parameters > thresholds.max_parameters {
            issues.push(Issue::new(
                Priority::P2,
                Category::ParameterCount,
                format!(
                    "{}:{} {}: {} parameters (max {})",
                    file.path,
                    method.start_line,
                    method.name,
                    method.parameters,
                    thresholds.max_parameters
                ),
            ));
        }
    }
}
