//! End-to-end tests for the `carve` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "src/index.ts",
        "import { Button } from './components/button';\nimport { fmt } from './utils/fmt';\n",
    );
    write(root, "src/components/button.ts", "import { fmt } from '../utils/fmt';\nexport const Button = 1;\n");
    write(root, "src/utils/fmt.ts", "export function fmt() {}\n");
    temp
}

fn carve(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("carve").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn split_prints_chunk_listing() {
    let temp = project();

    carve(temp.path())
        .args(["split", "src/index.ts", "--chunk", "ui=/components/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ui 1 module"))
        .stdout(predicate::str::contains("src/components/button.ts"))
        .stdout(predicate::str::contains("(unassigned) 2 modules"));
}

#[test]
fn split_json_follows_config_chunk_order() {
    let temp = project();
    write(
        temp.path(),
        "carve.toml",
        r#"
entry = "src/index.ts"

[chunks]
utils = "/utils/"
components = "/components/"
"#,
    );

    let output = carve(temp.path())
        .args(["split", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let chunks: Vec<&String> = json["chunks"].as_object().unwrap().keys().collect();
    assert_eq!(chunks, vec!["utils", "components"]);
    assert_eq!(json["chunks"]["utils"].as_array().unwrap().len(), 1);
    assert_eq!(json["unassigned"].as_array().unwrap().len(), 1);
}

#[test]
fn split_unresolvable_entry_warns_and_succeeds() {
    let temp = project();

    carve(temp.path())
        .args(["split", "src/missing.ts"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be resolved"));
}

#[test]
fn split_without_entry_fails() {
    let temp = project();

    carve(temp.path())
        .arg("split")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry point specified"));
}

#[test]
fn split_invalid_chunk_pattern_fails_before_building() {
    let temp = project();

    carve(temp.path())
        .args(["split", "src/index.ts", "--chunk", "bad=(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chunk pattern"));
}

#[test]
fn graph_reports_cycles() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.js", "import './b';\n");
    write(temp.path(), "b.js", "import './a';\nimport './gone';\n");

    carve(temp.path())
        .args(["graph", "a.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("./b -> b.js"))
        .stdout(predicate::str::contains("(cycle)"))
        .stdout(predicate::str::contains("./gone [not found]"))
        .stdout(predicate::str::contains("cycle: a.js -> b.js"));
}

#[test]
fn graph_json_lists_modules() {
    let temp = project();

    let output = carve(temp.path())
        .args(["graph", "src/index.ts", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["graph"]["root"], 0);
    assert_eq!(json["graph"]["modules"].as_array().unwrap().len(), 3);
    assert!(json["cycles"].as_array().unwrap().is_empty());
}

#[test]
fn graph_parse_error_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "index.js", "import {\n");

    carve(temp.path())
        .args(["graph", "index.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn resolve_uses_alias_and_from() {
    let temp = project();

    carve(temp.path())
        .args(["resolve", "@/utils/fmt", "--alias", "@/*=src/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/utils/fmt.ts"));

    carve(temp.path())
        .args(["resolve", "../utils/fmt", "--from", "src/components/button.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> src/utils/fmt.ts"));
}

#[test]
fn resolve_reports_ignored_specifier() {
    let temp = project();

    carve(temp.path())
        .args(["resolve", "./node_modules/react", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ignored\""));
}

#[test]
fn check_validates_config() {
    let temp = project();
    write(temp.path(), "carve.toml", "entry = \"src/index.ts\"\n");

    carve(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("entry:      src/index.ts"));
}

#[test]
fn check_reports_missing_root() {
    let temp = project();
    write(temp.path(), "carve.toml", "entry = \"index.ts\"\nroot = \"web\"\n");

    carve(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project root not found"));
}

#[test]
fn cwd_flag_selects_project() {
    let temp = project();

    carve(Path::new("/"))
        .args(["-C"])
        .arg(temp.path())
        .args(["split", "src/index.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(unassigned) 3 modules"));
}
