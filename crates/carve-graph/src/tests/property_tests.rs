//! Property-based tests for patterns, resolution and graph building.
//!
//! Run with: cargo test --features proptest --package carve-graph property_tests

#![cfg(feature = "proptest")]

use std::time::Duration;

use proptest::prelude::*;

use super::test_helpers::*;
use crate::pattern::normalize_pattern;
use crate::resolver::{AliasRule, resolve_path_alias};
use crate::test_utils::DelayedRuntime;
use crate::walker::BuildOptions;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Strategy for relative module paths like `a/bc/d`.
fn module_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..=4).prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: normalizing a pattern, its compiled form or its source text
    /// gives the same pattern.
    #[test]
    fn prop_normalization_is_idempotent(text in "[a-zA-Z0-9_/@.~-]{1,20}") {
        let escaped = regex::escape(&text);
        let first = normalize_pattern(escaped.as_str()).unwrap();
        let second = normalize_pattern(first.clone()).unwrap();
        let third = normalize_pattern(first.source()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &third);
    }

    /// Property: an alias only rewrites the matched prefix.
    #[test]
    fn prop_alias_rewrites_prefix_only(rest in module_path_strategy()) {
        let rules = vec![AliasRule::new("@/*", "src/").unwrap()];
        let aliased = format!("@/{rest}");
        prop_assert_eq!(resolve_path_alias(&aliased, &rules), format!("src/{rest}"));

        let relative = format!("./{rest}");
        prop_assert_eq!(resolve_path_alias(&relative, &rules), relative.clone());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: resolving an already resolved path returns it unchanged.
    #[test]
    fn prop_resolution_is_idempotent(path in module_path_strategy()) {
        let file = format!("{path}.ts");
        let project = Project::new(&[(file.as_str(), "")]);
        let runtime = project.runtime();
        let resolver = project.resolver();

        let (first, second) = block_on(async {
            let first = resolver.resolve(&path, None, runtime.as_ref()).await.unwrap();
            let resolved = first.local().unwrap().to_string_lossy().into_owned();
            let second = resolver.resolve(&resolved, None, runtime.as_ref()).await.unwrap();
            (first, second)
        });
        prop_assert_eq!(first.local(), Some(project.path(&file).as_path()));
        prop_assert_eq!(first, second);
    }

    /// Property: import statements keep declaration order whatever the read
    /// latency of each dependency.
    #[test]
    fn prop_import_order_matches_declaration_order(
        delays in prop::collection::vec(0u64..20, 1..=6)
    ) {
        let names: Vec<String> = (0..delays.len()).map(|i| format!("dep{i}")).collect();
        let index = names
            .iter()
            .map(|name| format!("import './{name}';"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut files: Vec<(String, String)> = vec![("index.ts".into(), index)];
        files.extend(names.iter().map(|name| (format!("{name}.ts"), String::new())));
        let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let project = Project::new(&borrowed);

        let mut runtime = DelayedRuntime::new(project.runtime());
        for (name, delay) in names.iter().zip(&delays) {
            runtime = runtime.delay(project.path(&format!("{name}.ts")), Duration::from_millis(*delay));
        }

        let graph = block_on(project.build_with(
            "index.ts",
            BuildOptions::default(),
            std::sync::Arc::new(runtime),
        ))
        .unwrap()
        .unwrap();

        let root = graph.root();
        prop_assert_eq!(root.imports.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(&root.imports[i].source, &format!("./{name}"));
            prop_assert_eq!(import_target(&graph, root, i), Some(project.path(&format!("{name}.ts"))));
        }
    }
}
