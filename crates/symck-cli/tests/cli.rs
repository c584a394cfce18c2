//! End-to-end runs of the `symck` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const LIBRARY: &str = r"
using System;
namespace RoslynBug
{
    public sealed class FromAnotherAssemblyAttribute : Attribute
    {
        public FromAnotherAssemblyAttribute(int arg) { }
    }
}
";

const PROGRAM: &str = r"
namespace Project
{
    using RoslynBug;
    using System;

    [FromAnotherAssembly(10)]
    [FromCurrentAssembly(10)]
    public class SimpleClass { }

    public sealed class FromCurrentAssemblyAttribute : Attribute
    {
        public FromCurrentAssemblyAttribute(int arg) { }
    }
}
";

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("RoslynBug.cs"), LIBRARY).expect("write library");
        std::fs::write(dir.path().join("SimpleClass.cs"), PROGRAM).expect("write program");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn symck(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_symck"))
            .args(args)
            .current_dir(self.path())
            .env_remove("SYMCK_LOG")
            .env_remove("SYMCK_CHECK__EXPECTED_ARGUMENT_COUNT")
            .env_remove("SYMCK_CHECK__DEFAULT_FORMAT")
            .output()
            .expect("run symck")
    }

    fn check(&self, extra: &[&str]) -> Output {
        let source = self.file("SimpleClass.cs");
        let reference = format!("RoslynBug={}", self.file("RoslynBug.cs").display());
        let mut args = vec![
            "check",
            "--source",
            source.to_str().expect("utf-8 path"),
            "--reference",
            reference.as_str(),
            "--target",
            "Project.SimpleClass",
            "--candidate",
            "Project.FromCurrentAssemblyAttribute",
            "--candidate",
            "RoslynBug.FromAnotherAssemblyAttribute",
            "--format",
            "json",
        ];
        args.extend_from_slice(extra);
        self.symck(&args)
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn check_passes_for_simple_class() {
    let workspace = Workspace::new();
    let output = workspace.check(&[]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report = stdout_json(&output);
    let verdicts = report["verdicts"].as_array().expect("verdicts");
    assert_eq!(verdicts.len(), 2);
    for verdict in verdicts {
        assert_eq!(verdict["identity_equals"], serde_json::json!(true));
        assert_eq!(verdict["argument_count"], serde_json::json!(1));
    }
}

#[test]
fn check_fails_with_exit_code_one_on_wrong_count() {
    let workspace = Workspace::new();
    let output = workspace.check(&["--expected-args", "2"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn project_config_sets_expected_count() {
    let workspace = Workspace::new();
    std::fs::create_dir(workspace.file(".symck")).expect("config dir");
    std::fs::write(
        workspace.file(".symck/config.toml"),
        "[check]\nexpected_argument_count = 3\n",
    )
    .expect("config");
    let output = workspace.check(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn resolve_unknown_type_is_an_error() {
    let workspace = Workspace::new();
    let source = workspace.file("SimpleClass.cs");
    let output = workspace.symck(&[
        "resolve",
        "--source",
        source.to_str().expect("utf-8 path"),
        "Project.Missing",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Type not found: Project.Missing"));
}

#[test]
fn attributes_lists_both_applications() {
    let workspace = Workspace::new();
    let source = workspace.file("SimpleClass.cs");
    let reference = workspace.file("RoslynBug.cs");
    let output = workspace.symck(&[
        "attributes",
        "--source",
        source.to_str().expect("utf-8 path"),
        "--reference",
        reference.to_str().expect("utf-8 path"),
        "--format",
        "raw",
        "Project.SimpleClass",
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let response = stdout_json(&output);
    let attributes = response["attributes"].as_array().expect("attributes");
    assert_eq!(attributes.len(), 2);
    assert_eq!(
        attributes[0]["attribute_class"]["key"]["assembly"]["name"],
        serde_json::json!("RoslynBug")
    );
}

#[test]
fn demo_passes_in_table_format() {
    let workspace = Workspace::new();
    let output = workspace.symck(&["demo", "--format", "table"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().next().is_some_and(|line| line.contains("expected")));
    assert_eq!(stdout.lines().filter(|line| line.ends_with("pass")).count(), 2);
}
