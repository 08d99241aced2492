//! Comment and string-literal scrubbing (the line classifier).
//!
//! Downstream pattern matching must never be confused by code-like text
//! inside comments or literals, so the scrubber replaces comment bodies and
//! literal contents with spaces while preserving delimiters and every
//! newline. Line numbers computed on the scrubbed text therefore equal line
//! numbers in the original source.

/// Classification of a physical source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Only whitespace.
    Blank,
    /// Non-blank, but nothing outside a comment.
    Comment,
    /// At least one character of code (string contents count as code).
    Code,
}

/// Result of scrubbing a source buffer.
#[derive(Debug)]
pub struct Scrubbed {
    /// Source with comment bodies and literal contents blanked out.
    /// Delimiters and newlines are preserved.
    pub text: String,
    /// One entry per physical line of the input.
    pub line_kinds: Vec<LineKind>,
    /// Number of lines whose trimmed text starts with `///`.
    pub doc_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str,
    VerbatimStr,
    CharLit,
}

/// Scrubs comments and literal contents from C# source.
///
/// Handles `//` and `/* ... */` comments (including multi-line blocks),
/// ordinary strings with backslash escapes, verbatim strings (`@"..."`,
/// where `""` is an escaped quote and newlines are legal), interpolated
/// strings (`$` prefixes change nothing for scrubbing purposes) and
/// character literals. Unterminated ordinary strings and char literals are
/// closed at the end of their line; this is a degraded-but-safe result for
/// malformed input, never an error.
#[must_use]
pub fn scrub(source: &str) -> Scrubbed {
    let mut text = String::with_capacity(source.len());
    let mut line_kinds = Vec::new();

    let mut state = State::Code;
    // Per-line flags, reset at each newline.
    let mut saw_any = false;
    let mut saw_code = false;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            if state == State::LineComment || state == State::Str || state == State::CharLit {
                state = State::Code;
            }
            line_kinds.push(classify(saw_any, saw_code));
            saw_any = false;
            saw_code = false;
            text.push('\n');
            continue;
        }
        if !c.is_whitespace() {
            saw_any = true;
        }

        match state {
            State::Code => {
                match c {
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        text.push_str("  ");
                        state = State::LineComment;
                        continue;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        text.push_str("  ");
                        state = State::BlockComment;
                        continue;
                    }
                    '@' | '$' => {
                        // Verbatim/interpolated string prefixes. `@` may also
                        // escape identifiers, in which case no quote follows.
                        text.push(c);
                        if !c.is_whitespace() {
                            saw_code = true;
                        }
                        let mut verbatim = c == '@';
                        while let Some(&next) = chars.peek() {
                            if next == '@' || next == '$' {
                                verbatim |= next == '@';
                                chars.next();
                                text.push(next);
                            } else {
                                break;
                            }
                        }
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            text.push('"');
                            state = if verbatim {
                                State::VerbatimStr
                            } else {
                                State::Str
                            };
                        }
                        continue;
                    }
                    '"' => {
                        state = State::Str;
                        saw_code = true;
                        text.push('"');
                        continue;
                    }
                    '\'' => {
                        state = State::CharLit;
                        saw_code = true;
                        text.push('\'');
                        continue;
                    }
                    _ => {}
                }
                if !c.is_whitespace() {
                    saw_code = true;
                }
                text.push(c);
            }
            State::LineComment => {
                text.push(' ');
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    text.push_str("  ");
                    state = State::Code;
                } else {
                    text.push(' ');
                }
            }
            State::Str => {
                saw_code = true;
                if c == '\\' {
                    text.push(' ');
                    if let Some(&next) = chars.peek() {
                        if next != '\n' {
                            chars.next();
                            text.push(' ');
                        }
                    }
                } else if c == '"' {
                    text.push('"');
                    state = State::Code;
                } else {
                    text.push(' ');
                }
            }
            State::VerbatimStr => {
                saw_code = true;
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        // Escaped quote inside a verbatim string.
                        chars.next();
                        text.push_str("  ");
                    } else {
                        text.push('"');
                        state = State::Code;
                    }
                } else {
                    text.push(' ');
                }
            }
            State::CharLit => {
                saw_code = true;
                if c == '\\' {
                    text.push(' ');
                    if let Some(&next) = chars.peek() {
                        if next != '\n' {
                            chars.next();
                            text.push(' ');
                        }
                    }
                } else if c == '\'' {
                    text.push('\'');
                    state = State::Code;
                } else {
                    text.push(' ');
                }
            }
        }
    }
    if saw_any || !source.is_empty() && !source.ends_with('\n') {
        line_kinds.push(classify(saw_any, saw_code));
    }

    let doc_lines = source
        .lines()
        .filter(|line| line.trim_start().starts_with("///"))
        .count();

    Scrubbed {
        text,
        line_kinds,
        doc_lines,
    }
}

fn classify(saw_any: bool, saw_code: bool) -> LineKind {
    if !saw_any {
        LineKind::Blank
    } else if saw_code {
        LineKind::Code
    } else {
        LineKind::Comment
    }
}
