//! JSON sidecar for machine consumption.

use anyhow::Result;
use serde_json::json;

use crate::auditor::AuditResult;

/// Renders the pretty-printed JSON document with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(result: &AuditResult) -> Result<String> {
    let document = json!({
        "summary": result.summary,
        "issues": result.issues,
        "data": {
            "files": result.files,
            "dependencies": result.dependencies,
            "cycles": result.cycles,
            "duplicates": result.duplicates,
            "warnings": result.warnings,
        },
    });
    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::{AuditResult, AuditSummary};
    use std::collections::BTreeMap;

    #[test]
    fn document_has_top_level_keys() {
        let result = AuditResult {
            files: Vec::new(),
            dependencies: BTreeMap::new(),
            cycles: Vec::new(),
            duplicates: Vec::new(),
            issues: Vec::new(),
            summary: AuditSummary::default(),
            warnings: Vec::new(),
        };
        let rendered = render_json(&result).unwrap();
        assert!(rendered.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.get("summary").is_some());
        assert!(parsed.get("issues").is_some());
        assert!(parsed.get("data").is_some());
    }
}
