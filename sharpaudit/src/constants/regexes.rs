use regex::Regex;
use std::sync::OnceLock;

/// Returns the compiled regex for method/constructor declaration sites.
///
/// Requires at least one modifier keyword so that calls and local statements
/// never match. The parameter list and body are NOT captured here; the
/// scanner walks forward from the open paren with explicit depth counters.
pub fn get_signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<mods>\b(?:(?:public|protected|private|internal|static|virtual|override|sealed|async|unsafe|extern|partial)\s+)+)
            (?P<ret>(?:[A-Za-z_][A-Za-z0-9_<>,\[\]?.]*\s+)*?)
            (?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\(",
        )
        .expect("invalid signature regex")
    })
}

/// Returns the compiled regex for the first namespace declaration
/// (block-scoped or file-scoped).
pub fn get_namespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\bnamespace\s+([A-Za-z_][A-Za-z0-9_.]*)").expect("invalid namespace regex")
    })
}

/// Returns the compiled regex for `using` directives.
///
/// Alias directives (`using X = ...`) are deliberately not matched; they do
/// not introduce a plain namespace reference.
pub fn get_using_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*using\s+(?:static\s+)?([A-Za-z_][A-Za-z0-9_.]*)\s*;")
            .expect("invalid using regex")
    })
}

/// Returns the compiled regex for type declarations.
pub fn get_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\b(?:class|struct|record|interface|enum)\s+([A-Za-z_][A-Za-z0-9_]*)")
            .expect("invalid type regex")
    })
}

/// Returns the compiled regex for decision-point keywords in a scrubbed body.
pub fn get_decision_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\b(?:if|for|foreach|while|case|catch)\b").expect("invalid decision regex")
    })
}
