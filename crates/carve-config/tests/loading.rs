//! Tests for layered config loading: defaults, file, environment, overrides.
//!
//! Each test uses its own environment prefix so tests can run in parallel.

use carve_config::{ConfigLoader, ConfigOverrides};
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn defaults_apply_without_config_file() {
    let dir = TempDir::new().unwrap();

    let loaded = ConfigLoader::new(dir.path())
        .env_prefix("CARVE_TEST_DEFAULTS_")
        .load()
        .unwrap();

    assert!(loaded.source.is_none());
    assert_eq!(loaded.project_dir, dir.path());
    assert_eq!(loaded.config.extensions, vec![".js", ".cjs", ".mjs", ".ts"]);
    assert!(loaded.config.entry.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("carve.toml"),
        r#"
entry = "src/index.ts"
extensions = [".ts", ".tsx"]
"#,
    )
    .unwrap();

    let loaded = ConfigLoader::new(dir.path())
        .env_prefix("CARVE_TEST_FILE_")
        .load()
        .unwrap();

    assert_eq!(loaded.source, Some(dir.path().join("carve.toml")));
    assert_eq!(loaded.config.entry, "src/index.ts");
    assert_eq!(loaded.config.extensions, vec![".ts", ".tsx"]);
    // Untouched fields keep defaults.
    assert_eq!(loaded.config.ignore_patterns, vec!["node_modules"]);
}

#[test]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("carve.toml"),
        "entry = \"a.ts\"\nmax_depth = 10\n",
    )
    .unwrap();

    // SAFETY: the variable name is unique to this test.
    unsafe {
        env::set_var("CARVE_TEST_ENV_MAX_DEPTH", "3");
    }
    let loaded = ConfigLoader::new(dir.path())
        .env_prefix("CARVE_TEST_ENV_")
        .load();
    unsafe {
        env::remove_var("CARVE_TEST_ENV_MAX_DEPTH");
    }

    let loaded = loaded.unwrap();
    assert_eq!(loaded.config.entry, "a.ts");
    assert_eq!(loaded.config.max_depth, 3);
}

#[test]
fn overrides_win_over_environment() {
    let dir = TempDir::new().unwrap();

    // SAFETY: the variable name is unique to this test.
    unsafe {
        env::set_var("CARVE_TEST_OVERRIDE_ENTRY", "from-env.ts");
    }
    let loaded = ConfigLoader::new(dir.path())
        .env_prefix("CARVE_TEST_OVERRIDE_")
        .overrides(ConfigOverrides {
            entry: Some("from-flag.ts".to_string()),
            follow_re_exports: Some(false),
            ..Default::default()
        })
        .load();
    unsafe {
        env::remove_var("CARVE_TEST_OVERRIDE_ENTRY");
    }

    let loaded = loaded.unwrap();
    assert_eq!(loaded.config.entry, "from-flag.ts");
    assert!(!loaded.config.follow_re_exports);
}

#[test]
fn explicit_config_file_sets_project_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("web");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        nested.join("planner.toml"),
        "entry = \"index.js\"\nroot = \"src\"\n",
    )
    .unwrap();

    let loaded = ConfigLoader::new(dir.path())
        .config_file("web/planner.toml")
        .env_prefix("CARVE_TEST_EXPLICIT_")
        .load()
        .unwrap();

    assert_eq!(loaded.project_dir, nested);
    assert_eq!(loaded.project_root(), nested.join("src"));
    assert_eq!(loaded.config.root, Some(PathBuf::from("src")));
}

#[test]
fn chunk_order_survives_layering() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("carve.toml"),
        r#"
entry = "index.ts"

[chunks]
vendor = "/lib/"
app = "/app/"
"#,
    )
    .unwrap();

    let loaded = ConfigLoader::new(dir.path())
        .env_prefix("CARVE_TEST_ORDER_")
        .load()
        .unwrap();

    let chunks: Vec<&str> = loaded.config.chunks.keys().map(String::as_str).collect();
    assert_eq!(chunks, vec!["vendor", "app"]);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    let result = ConfigLoader::new(dir.path())
        .config_file("absent.toml")
        .env_prefix("CARVE_TEST_MISSING_")
        .load();

    assert!(result.is_err());
}
