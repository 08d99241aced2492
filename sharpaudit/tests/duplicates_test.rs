//! Duplicate fragment detection, end to end.

use sharpaudit::issues::Category;
use sharpaudit::Auditor;
use std::fs;
use tempfile::tempdir;

const ALPHA: &str = r"namespace Dup.Alpha
{
    public class Alpha
    {
        public int Total(int[] items, int limit)
        {
            var total = 0;
            foreach (var item in items)
            {
                total += item;
            }
            if (total > limit)
            {
                throw new System.InvalidOperationException();
            }
            return total;
        }
    }
}
";

const BETA: &str = r"namespace Dup.Beta
{
    public class Beta
    {
        public int CheckedSum(int[] items, int limit)
        {
            var total = 0;
            foreach (var item in items)
            {
                total += item;
            }
            if (total > limit)
            {
                throw new System.InvalidOperationException();
            }
            return total;
        }
    }
}
";

#[test]
fn shared_block_across_two_files_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Alpha.cs"), ALPHA).unwrap();
    fs::write(dir.path().join("Beta.cs"), BETA).unwrap();

    let result = Auditor::new().audit(dir.path()).unwrap();

    assert!(!result.duplicates.is_empty());
    assert_eq!(result.summary.duplicate_fragments, result.duplicates.len());
    for fragment in &result.duplicates {
        let files: Vec<&str> = fragment
            .occurrences
            .iter()
            .map(|o| o.file.as_str())
            .collect();
        assert!(files.contains(&"Alpha.cs"));
        assert!(files.contains(&"Beta.cs"));
    }
    assert!(result
        .issues
        .iter()
        .any(|i| i.category == Category::Duplication));
}

#[test]
fn occurrence_line_numbers_point_at_the_source() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Alpha.cs"), ALPHA).unwrap();
    fs::write(dir.path().join("Beta.cs"), BETA).unwrap();

    // A window spanning exactly the shared body, with no room to slide.
    let auditor = Auditor::new().with_window(10);
    let result = auditor.audit(dir.path()).unwrap();

    let fragment = result
        .duplicates
        .iter()
        .find(|f| f.lines.first().is_some_and(|l| l == "var total = 0;"))
        .unwrap();
    // "var total = 0;" sits on line 7 of both files.
    assert!(fragment.occurrences.iter().all(|o| o.start_line == 7));
}

#[test]
fn unrelated_files_share_no_fragments() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Alpha.cs"), ALPHA).unwrap();
    fs::write(
        dir.path().join("Other.cs"),
        "namespace Other\n{\n    public class Solo\n    {\n        public void Ping()\n        {\n            System.Console.WriteLine(1);\n        }\n    }\n}\n",
    )
    .unwrap();

    let result = Auditor::new().audit(dir.path()).unwrap();
    assert!(result.duplicates.is_empty());
}

#[test]
fn comment_only_differences_still_match() {
    let dir = tempdir().unwrap();
    // Beta carries an extra comment inside the block; comment lines are
    // dropped before windowing, so the fragments still align.
    let beta_commented = BETA.replace(
        "            var total = 0;",
        "            // accumulate\n            var total = 0;",
    );
    fs::write(dir.path().join("Alpha.cs"), ALPHA).unwrap();
    fs::write(dir.path().join("Beta.cs"), beta_commented).unwrap();

    let result = Auditor::new().audit(dir.path()).unwrap();
    assert!(!result.duplicates.is_empty());
}
