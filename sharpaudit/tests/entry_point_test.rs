//! End-to-end tests for the CLI entry point: exit codes, JSON mode and
//! report emission.

use sharpaudit::entry_point::run_with_args_to;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CLEAN: &str = r"namespace Tidy
{
    public class Calculator
    {
        /// <summary>Adds two operands.</summary>
        public int Add(int a, int b)
        {
            return a + b;
        }
    }
}
";

fn tangled_source() -> String {
    let mut body = String::new();
    for i in 0..21 {
        body.push_str(&format!(
            "            if (x > {i}) {{ total += {i}; }}\n"
        ));
    }
    format!(
        "namespace Tangle\n{{\n    public class Knot\n    {{\n        public int Score(int x)\n        {{\n            var total = 0;\n{body}            return total;\n        }}\n    }}\n}}\n"
    )
}

fn run(args: &[&str]) -> (i32, String) {
    let mut buf = Vec::new();
    let code = run_with_args_to(args.iter().map(|&s| s.to_owned()).collect(), &mut buf).unwrap();
    (code, String::from_utf8(buf).unwrap())
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn clean_tree_passes_the_gate() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Calc.cs"), CLEAN).unwrap();

    let root = path_str(dir.path());
    let (code, _) = run(&[&root, "--quiet", "--no-report", "--fail-on", "P2"]);
    assert_eq!(code, 0);
}

#[test]
fn severe_complexity_trips_the_gate() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Knot.cs"), tangled_source()).unwrap();

    let root = path_str(dir.path());
    let (code, _) = run(&[&root, "--quiet", "--no-report", "--fail-on", "P0"]);
    assert_eq!(code, 1);
}

#[test]
fn gate_priority_is_inclusive_downwards() {
    let dir = tempdir().unwrap();
    // P2 findings only: too many parameters, missing docs.
    fs::write(
        dir.path().join("Wide.cs"),
        "namespace Wide\n{\n    public class W\n    {\n        public void Call(int a, int b, int c, int d, int e, int f)\n        {\n        }\n    }\n}\n",
    )
    .unwrap();

    let root = path_str(dir.path());
    // P2 issues do not trip a P1 gate.
    let (code, _) = run(&[&root, "--quiet", "--no-report", "--fail-on", "P1"]);
    assert_eq!(code, 0);
    // They do trip a P2 gate.
    let (code, _) = run(&[&root, "--quiet", "--no-report", "--fail-on", "P2"]);
    assert_eq!(code, 1);
}

#[test]
fn json_mode_emits_the_document() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Calc.cs"), CLEAN).unwrap();

    let root = path_str(dir.path());
    let (code, out) = run(&[&root, "--json", "--no-report"]);
    assert_eq!(code, 0);
    assert!(out.ends_with('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["summary"]["files"], 1);
    assert!(parsed["issues"].as_array().unwrap().is_empty());
    assert_eq!(parsed["data"]["files"][0]["path"], "Calc.cs");
}

#[test]
fn reports_are_written_and_stable() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Calc.cs"), CLEAN).unwrap();
    let out_dir = dir.path().join("reports");

    let root = path_str(dir.path());
    let out = path_str(&out_dir);
    let (code, _) = run(&[&root, "--quiet", "--output", &out]);
    assert_eq!(code, 0);

    let markdown = fs::read_to_string(out_dir.join("audit_report.md")).unwrap();
    let json = fs::read_to_string(out_dir.join("audit_report.json")).unwrap();
    assert!(markdown.starts_with("# Code Audit Report"));
    assert!(json.ends_with('\n'));

    // Second run over the same tree is byte-identical.
    let (code, _) = run(&[&root, "--quiet", "--output", &out]);
    assert_eq!(code, 0);
    assert_eq!(
        markdown,
        fs::read_to_string(out_dir.join("audit_report.md")).unwrap()
    );
    assert_eq!(
        json,
        fs::read_to_string(out_dir.join("audit_report.json")).unwrap()
    );
}

#[test]
fn missing_root_fails_with_an_error() {
    let dir = tempdir().unwrap();
    let missing = path_str(&dir.path().join("nope"));

    let mut buf = Vec::new();
    let err = run_with_args_to(
        vec![missing, "--quiet".to_owned(), "--no-report".to_owned()],
        &mut buf,
    )
    .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn cli_threshold_overrides_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Calc.cs"), CLEAN).unwrap();
    fs::write(
        dir.path().join(".sharpaudit.toml"),
        "[sharpaudit]\nmax_parameters = 1\n",
    )
    .unwrap();

    let root = path_str(dir.path());
    // Config alone flags Add(int, int); the CLI override relaxes it again.
    let (code, _) = run(&[&root, "--quiet", "--no-report", "--fail-on", "P2"]);
    assert_eq!(code, 1);
    let (code, _) = run(&[
        &root,
        "--quiet",
        "--no-report",
        "--fail-on",
        "P2",
        "--max-parameters",
        "5",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn help_exits_cleanly() {
    let (code, out) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("sharpaudit"));
    assert!(out.contains("--fail-on"));
}
