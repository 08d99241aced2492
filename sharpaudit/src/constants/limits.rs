/// File extension of the sources this tool audits.
pub const SOURCE_EXTENSION: &str = "cs";
/// Default configuration filename, discovered by walking up from the audit root.
pub const CONFIG_FILENAME: &str = ".sharpaudit.toml";
/// Namespace prefix excluded from the dependency graph by default.
pub const DEFAULT_STD_PREFIX: &str = "System";
/// Default sliding-window size (in normalized lines) for duplicate detection.
pub const DUPLICATE_WINDOW: usize = 5;
/// How far the doc-comment look-back scans above a declaration.
pub const DOC_LOOKBACK_LINES: usize = 10;

/// Files above this LOC count are flagged as oversized.
pub const MAX_FILE_LOC: usize = 400;
/// Files with more methods than this are flagged as oversized.
pub const MAX_FILE_METHODS: usize = 25;
/// Complexity above this is a P1 finding.
pub const COMPLEXITY_WARN: usize = 10;
/// Complexity above this is a P0 finding.
pub const COMPLEXITY_SEVERE: usize = 20;
/// Method length (lines) above this is a P2 finding.
pub const METHOD_LINES_WARN: usize = 60;
/// Method length (lines) above this is a P1 finding.
pub const METHOD_LINES_SEVERE: usize = 120;
/// Methods with more parameters than this are flagged.
pub const MAX_PARAMETERS: usize = 5;
/// Namespaces depending on more than this many namespaces are flagged.
pub const MAX_FAN_OUT: usize = 8;
/// Namespaces depended on by more than this many namespaces are flagged.
pub const MAX_FAN_IN: usize = 8;
/// Files with a doc ratio below this are flagged as under-documented.
pub const MIN_DOC_RATIO: f64 = 0.05;
/// Doc-ratio findings only apply to files at least this long.
pub const MIN_DOC_RATIO_FILE_LOC: usize = 50;
