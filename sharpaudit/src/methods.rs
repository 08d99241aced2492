//! Method declaration scanning and body extraction.
//!
//! Declarations are located in the scrubbed text (comments and literal
//! contents blanked out) so bodies, braces and keywords inside strings can
//! never confuse the scanners. All byte offsets here are offsets into the
//! scrubbed text, whose line structure matches the original source.

use crate::constants::{get_decision_keyword_re, get_signature_re, DOC_LOOKBACK_LINES};
use crate::utils::LineIndex;

/// Metrics for a single extracted method or constructor.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MethodRecord {
    /// Declared name (constructors keep the type name).
    pub name: String,
    /// Number of declared parameters.
    pub parameters: usize,
    /// Cyclomatic-complexity estimate, always >= 1.
    pub complexity: usize,
    /// 1-indexed line of the declaration.
    pub start_line: usize,
    /// 1-indexed line where the body span ends.
    pub end_line: usize,
    /// Body length in lines, inclusive.
    pub length: usize,
    /// Maximum brace-nesting depth reached inside the body (the method's own
    /// block counts as depth 1; expression bodies start at 0).
    pub nesting_depth: usize,
    /// Whether the declaration carries the `async` modifier.
    pub is_async: bool,
    /// Whether the declaration carries the `public` modifier.
    pub is_public: bool,
    /// Whether a `///` doc comment immediately precedes the declaration.
    pub doc_present: bool,
}

enum BodyKind {
    /// Offset of the opening brace.
    Block(usize),
    /// Offset just past the `=>` token.
    Expression(usize),
    /// Abstract/interface declaration; excluded from metrics.
    None,
}

/// Scans the scrubbed text for method declarations and extracts per-method
/// metrics. Irregular declarations are skipped individually; the scan itself
/// never fails.
#[must_use]
pub fn scan_methods(source: &str, scrubbed: &str, index: &LineIndex) -> Vec<MethodRecord> {
    let source_lines: Vec<&str> = source.lines().collect();
    let bytes = scrubbed.as_bytes();
    let mut methods = Vec::new();

    for caps in get_signature_re().captures_iter(scrubbed) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(name) = caps.name("name") else {
            continue;
        };
        let mods = caps.name("mods").map_or("", |m| m.as_str());

        let params_start = whole.end();
        let Some((params_end, parameters)) = scan_parameters(bytes, params_start) else {
            continue;
        };

        let (body_start, body_end, nesting_depth) =
            match locate_body(bytes, params_end + 1) {
                Some(BodyKind::Block(brace)) => {
                    let (end, depth) = match_braces(bytes, brace);
                    (brace, end, depth)
                }
                Some(BodyKind::Expression(start)) => {
                    let end = scrubbed[start..]
                        .find(';')
                        .map_or(scrubbed.len(), |i| start + i);
                    (start, end, max_brace_depth(&bytes[start..end]))
                }
                Some(BodyKind::None) | None => continue,
            };

        let body = &scrubbed[body_start..body_end.min(scrubbed.len())];
        let complexity = 1 + count_decision_points(body);

        let start_line = index.line_of(whole.start());
        let last_offset = body_end
            .saturating_sub(1)
            .min(scrubbed.len().saturating_sub(1));
        let end_line = index.line_of(last_offset).max(start_line);

        methods.push(MethodRecord {
            name: name.as_str().to_owned(),
            parameters,
            complexity,
            start_line,
            end_line,
            length: end_line - start_line + 1,
            nesting_depth,
            is_async: mods.contains("async"),
            is_public: mods.contains("public"),
            doc_present: has_leading_doc(&source_lines, start_line),
        });
    }

    methods
}

/// Walks the parameter list from just past the opening paren, balancing
/// parens, angle brackets and square brackets so commas nested inside
/// generic arguments or nested groups never split the count.
///
/// Returns the offset of the closing paren and the parameter count, or
/// `None` when the list never closes.
fn scan_parameters(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let mut paren: usize = 1;
    let mut angle: usize = 0;
    let mut bracket: usize = 0;
    let mut commas = 0;
    let mut has_content = false;

    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => paren += 1,
            b')' => {
                paren -= 1;
                if paren == 0 {
                    let count = if has_content { commas + 1 } else { 0 };
                    return Some((i, count));
                }
            }
            b'<' => angle += 1,
            b'>' => angle = angle.saturating_sub(1),
            b'[' => bracket += 1,
            b']' => bracket = bracket.saturating_sub(1),
            b',' if paren == 1 && angle == 0 && bracket == 0 => commas += 1,
            c => {
                if !c.is_ascii_whitespace() {
                    has_content = true;
                }
            }
        }
        if matches!(bytes[i], b'(' | b'<' | b'[') {
            has_content = true;
        }
        i += 1;
    }
    None
}

/// Finds what follows the parameter list: a block body, an expression body,
/// or a bare terminator. Generic `where` constraints and constructor
/// initializers (`: base(...)`) are skipped over on the way.
fn locate_body(bytes: &[u8], start: usize) -> Option<BodyKind> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => return Some(BodyKind::Block(i)),
            b';' => return Some(BodyKind::None),
            b'=' if i + 1 < bytes.len() && bytes[i + 1] == b'>' => {
                return Some(BodyKind::Expression(i + 2));
            }
            b'}' => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Finds the end of a balanced-brace block starting at `open` (the offset of
/// the opening brace). Returns the offset just past the closing brace and
/// the maximum depth reached. When the block never closes, the span falls
/// back to the rest of the buffer rather than failing.
fn match_braces(bytes: &[u8], open: usize) -> (usize, usize) {
    let mut depth: usize = 0;
    let mut max_depth = 0;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (i + 1, max_depth);
                }
            }
            _ => {}
        }
        i += 1;
    }
    (bytes.len(), max_depth)
}

fn max_brace_depth(bytes: &[u8]) -> usize {
    let mut depth: usize = 0;
    let mut max_depth = 0;
    for &b in bytes {
        match b {
            b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

/// Counts decision points in a scrubbed body: branch/loop/case/catch
/// keywords, short-circuit operators, and the ternary operator. `?` tokens
/// belonging to `??`, `?.` and closing-position nullable annotations are
/// excluded; a nullable annotation before whitespace is indistinguishable
/// from a ternary without a parser and may overcount.
#[must_use]
pub fn count_decision_points(body: &str) -> usize {
    let keywords = get_decision_keyword_re().find_iter(body).count();
    let and_or = body.matches("&&").count() + body.matches("||").count();

    let bytes = body.as_bytes();
    let mut ternary = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'?' {
            continue;
        }
        if i > 0 && bytes[i - 1] == b'?' {
            continue;
        }
        let next = bytes.get(i + 1).copied();
        if matches!(
            next,
            Some(b'?' | b'.' | b')' | b',' | b'>' | b';' | b']' | b'[')
        ) {
            continue;
        }
        ternary += 1;
    }

    keywords + and_or + ternary
}

/// Backward scan for a leading `///` doc comment: skip blank lines and
/// `[...]` attribute lines, then test the first remaining line. The
/// look-back is bounded so malformed files stay cheap.
fn has_leading_doc(source_lines: &[&str], decl_line: usize) -> bool {
    if decl_line < 2 {
        return false;
    }
    let mut looked = 0;
    let mut i = decl_line - 1; // index of the line above the declaration
    while i > 0 && looked < DOC_LOOKBACK_LINES {
        let line = source_lines.get(i - 1).map_or("", |l| l.trim());
        if line.is_empty() || (line.starts_with('[') && line.ends_with(']')) {
            i -= 1;
            looked += 1;
            continue;
        }
        return line.starts_with("///");
    }
    false
}
