//! Graph building against temporary projects.

use std::sync::Arc;
use std::time::Duration;

use super::test_helpers::*;
use crate::resolver::SkipReason;
use crate::test_utils::{DelayedRuntime, TestRuntime};
use crate::walker::{BuildOptions, GraphBuilder, MAX_FILE_SIZE, ParserPlugin, build_graph};
use crate::{BuildError, ImportOutcome, ImportedName, ModuleId};

#[tokio::test]
async fn test_single_module_without_imports() {
    let project = Project::new(&[("index.ts", "export const x = 1;")]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    assert_eq!(graph.len(), 1);
    let root = graph.root();
    assert_eq!(root.path, project.path("index.ts"));
    assert!(root.imports.is_empty());
    assert_eq!(root.exports[0].names, vec!["x"]);
    assert_eq!(root.id, ModuleId(0));
}

#[tokio::test]
async fn test_relative_import_is_resolved() {
    let project = Project::new(&[
        ("index.ts", "import { helper } from './util';\nhelper();"),
        ("util.ts", "export function helper() {}"),
    ]);

    let graph = project.build("index").await.unwrap().unwrap();

    assert_eq!(graph.len(), 2);
    let root = graph.root();
    assert_eq!(root.imports.len(), 1);
    assert_eq!(root.imports[0].source, "./util");
    assert_eq!(root.imports[0].names, vec![ImportedName::Named("helper".into())]);
    assert_eq!(import_target(&graph, root, 0), Some(project.path("util.ts")));
}

#[tokio::test]
async fn test_cycle_terminates_with_back_edge() {
    let project = Project::new(&[
        ("a.ts", "import { b } from './b';\nexport const a = 1;"),
        ("b.ts", "import { a } from './a';\nexport const b = 2;"),
    ]);

    let graph = project.build("a.ts").await.unwrap().unwrap();

    assert_eq!(graph.len(), 2);
    let a = graph.root();
    let b = graph.get(&project.path("b.ts")).unwrap();
    assert_eq!(a.imports[0].target(), Some(b.id));
    assert_eq!(b.imports[0].target(), Some(a.id));
    assert_eq!(graph.find_cycles(), vec![vec![a.id, b.id]]);
}

#[tokio::test]
async fn test_self_import_points_at_itself() {
    let project = Project::new(&[("a.ts", "import './a';")]);

    let graph = project.build("a.ts").await.unwrap().unwrap();

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.root().imports[0].target(), Some(graph.root_id()));
    assert!(graph.root().imports[0].is_side_effect_only());
}

#[tokio::test]
async fn test_shared_dependency_appears_once() {
    let project = Project::new(&[
        ("index.ts", "import './a';\nimport './b';"),
        ("a.ts", "import { s } from './shared';"),
        ("b.ts", "import { s } from './shared';"),
        ("shared.ts", "export const s = 1;"),
    ]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    assert_eq!(graph.len(), 4);
    let a = graph.get(&project.path("a.ts")).unwrap();
    let b = graph.get(&project.path("b.ts")).unwrap();
    let shared = graph.id_of(&project.path("shared.ts")).unwrap();
    assert_eq!(a.imports[0].target(), Some(shared));
    assert_eq!(b.imports[0].target(), Some(shared));
    assert_eq!(graph.dependents(shared).len(), 2);
}

#[tokio::test]
async fn test_import_order_survives_uneven_read_times() {
    let project = Project::new(&[
        ("index.ts", "import './slow';\nimport './fast';"),
        ("slow.ts", "export {};"),
        ("fast.ts", "export {};"),
    ]);
    let runtime = DelayedRuntime::new(project.runtime())
        .delay(project.path("slow.ts"), Duration::from_millis(50));

    let graph = project
        .build_with("index.ts", BuildOptions::default(), Arc::new(runtime))
        .await
        .unwrap()
        .unwrap();

    let root = graph.root();
    assert_eq!(root.imports[0].source, "./slow");
    assert_eq!(root.imports[1].source, "./fast");
    assert_eq!(import_target(&graph, root, 0), Some(project.path("slow.ts")));
    assert_eq!(import_target(&graph, root, 1), Some(project.path("fast.ts")));
}

#[tokio::test]
async fn test_missing_import_is_recorded_as_skipped() {
    let project = Project::new(&[("index.ts", "import React from 'react';\nimport './gone';")]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    let root = graph.root();
    assert_eq!(graph.len(), 1);
    assert_eq!(root.imports.len(), 2);
    assert_eq!(root.imports[0].names, vec![ImportedName::Default]);
    assert_eq!(root.imports[0].outcome, ImportOutcome::from(SkipReason::NotFound));
    assert_eq!(root.imports[1].target(), None);
}

#[tokio::test]
async fn test_ignored_module_is_never_read() {
    // Parsing this file would fail the build.
    let project = Project::new(&[
        ("index.ts", "import lib from './node_modules/lib';"),
        ("node_modules/lib/index.js", "this is not javascript {"),
    ]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    assert_eq!(graph.len(), 1);
    assert_eq!(
        graph.root().imports[0].outcome.skip_reason(),
        Some(SkipReason::Ignored)
    );
}

#[tokio::test]
async fn test_unsupported_extension_is_skipped() {
    let project = Project::new(&[
        ("index.ts", "import './styles.css';\nimport logo from './logo.svg';"),
        ("styles.css", "body {}"),
        ("logo.svg", "<svg/>"),
    ]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    let reasons: Vec<_> = graph
        .root()
        .imports
        .iter()
        .map(|import| import.outcome.skip_reason())
        .collect();
    assert_eq!(
        reasons,
        vec![
            Some(SkipReason::UnsupportedExtension),
            Some(SkipReason::UnsupportedExtension)
        ]
    );
}

#[tokio::test]
async fn test_index_file_import() {
    let project = Project::new(&[
        ("src/index.ts", "export * from './components';"),
        ("src/components/index.ts", "export const Button = 1;"),
    ]);

    let graph = project.build("src/index.ts").await.unwrap().unwrap();

    let root = graph.root();
    assert!(root.exports[0].is_star());
    let target = root.exports[0].target().and_then(|id| graph.module(id)).unwrap();
    assert_eq!(target.path, project.path("src/components/index.ts"));
}

#[tokio::test]
async fn test_re_exports_can_be_left_unfollowed() {
    let project = Project::new(&[
        ("index.ts", "export { x } from './x';"),
        ("x.ts", "export const x = 1;"),
    ]);

    let options = BuildOptions::default().follow_re_exports(false);
    let graph = project
        .build_with("index.ts", options, project.runtime())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(graph.len(), 1);
    let re_export = graph.root().exports[0].re_export.as_ref().unwrap();
    assert_eq!(re_export.source, "./x");
    assert_eq!(re_export.outcome, None);
}

#[tokio::test]
async fn test_imports_and_re_exports_keep_separate_outcomes() {
    let project = Project::new(&[
        ("index.ts", "import { a } from './a';\nexport { b } from './b';\nexport { c } from './missing';"),
        ("a.ts", "export const a = 1;"),
        ("b.ts", "export const b = 1;"),
    ]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    let root = graph.root();
    assert_eq!(import_target(&graph, root, 0), Some(project.path("a.ts")));
    assert_eq!(
        root.exports[0].target(),
        graph.id_of(&project.path("b.ts"))
    );
    assert_eq!(
        root.exports[1].re_export.as_ref().and_then(|r| r.outcome),
        Some(ImportOutcome::from(SkipReason::NotFound))
    );
}

#[tokio::test]
async fn test_unresolvable_entry_yields_no_graph() {
    let project = Project::new(&[("index.ts", "")]);

    assert!(project.build("does-not-exist").await.unwrap().is_none());
    assert!(project.build("node_modules/x").await.unwrap().is_none());
}

#[tokio::test]
async fn test_parse_error_fails_the_build() {
    let project = Project::new(&[
        ("index.ts", "import './broken';"),
        ("broken.ts", "export const = ;"),
    ]);

    let err = project.build("index.ts").await.unwrap_err();
    match err {
        BuildError::Parse(parse) => assert_eq!(parse.path, project.path("broken.ts")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_utf8_is_a_read_error() {
    let project = Project::new(&[("index.ts", "import './bin';")]);
    std::fs::write(project.path("bin.ts"), [0xff, 0xfe, 0x00]).unwrap();

    let err = project.build("index.ts").await.unwrap_err();
    assert!(matches!(err, BuildError::ReadFile { ref path, .. } if *path == project.path("bin.ts")));
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let project = Project::new(&[("index.ts", "import './big';")]);
    std::fs::write(project.path("big.ts"), vec![b' '; MAX_FILE_SIZE + 1]).unwrap();

    let err = project.build("index.ts").await.unwrap_err();
    assert!(matches!(err, BuildError::FileTooLarge { size, .. } if size == MAX_FILE_SIZE + 1));
}

#[tokio::test]
async fn test_slow_nested_module_times_out() {
    let project = Project::new(&[
        ("index.ts", "import './slow';\nimport './fast';"),
        ("slow.ts", ""),
        ("fast.ts", ""),
    ]);
    let runtime = DelayedRuntime::new(project.runtime())
        .delay(project.path("slow.ts"), Duration::from_millis(500));
    let options = BuildOptions::default().read_timeout(Duration::from_millis(50));

    let graph = project
        .build_with("index.ts", options, Arc::new(runtime))
        .await
        .unwrap()
        .unwrap();

    let root = graph.root();
    assert_eq!(root.imports[0].outcome, ImportOutcome::from(SkipReason::TimedOut));
    assert_eq!(import_target(&graph, root, 1), Some(project.path("fast.ts")));
    assert!(!graph.contains(&project.path("slow.ts")));
}

#[tokio::test]
async fn test_slow_entry_yields_no_graph() {
    let project = Project::new(&[("index.ts", "")]);
    let runtime = DelayedRuntime::new(project.runtime())
        .delay(project.path("index.ts"), Duration::from_millis(500));
    let options = BuildOptions::default().read_timeout(Duration::from_millis(20));

    let graph = project
        .build_with("index.ts", options, Arc::new(runtime))
        .await
        .unwrap();
    assert!(graph.is_none());
}

#[tokio::test]
async fn test_module_limit() {
    let project = Project::new(&[
        ("index.ts", "import './a';"),
        ("a.ts", "import './b';"),
        ("b.ts", ""),
    ]);

    let options = BuildOptions::default().max_modules(2);
    let err = project
        .build_with("index.ts", options, project.runtime())
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::TooManyModules { max: 2, .. }));
}

#[tokio::test]
async fn test_depth_limit() {
    let project = Project::new(&[
        ("index.ts", "import './a';"),
        ("a.ts", "import './b';"),
        ("b.ts", ""),
    ]);

    let options = BuildOptions::default().max_depth(1);
    let err = project
        .build_with("index.ts", options, project.runtime())
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::MaxDepthExceeded { depth: 2, max: 1 }));
}

#[tokio::test]
async fn test_type_only_imports_are_flagged() {
    let project = Project::new(&[
        ("index.ts", "import type { Props } from './types';\nimport { run } from './run';"),
        ("types.ts", "export interface Props {}"),
        ("run.ts", "export function run() {}"),
    ]);

    let graph = project.build("index.ts").await.unwrap().unwrap();

    let imports = &graph.root().imports;
    assert!(imports[0].type_only);
    assert!(!imports[1].type_only);
    assert_eq!(graph.len(), 3);
}

#[tokio::test]
async fn test_plugins_apply_to_every_module() {
    let project = Project::new(&[
        ("index.js", "import { view } from './view';"),
        ("view.js", "const n: number = 1;\nexport const view = n;"),
    ]);

    assert!(matches!(
        project.build("index.js").await,
        Err(BuildError::Parse(_))
    ));

    let graph = build_graph(
        "index.js",
        project.resolver(),
        &[ParserPlugin::TypeScript],
        project.runtime(),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(graph.len(), 2);
}

#[tokio::test]
async fn test_alias_and_bare_specifiers_use_root() {
    let project = Project::new(&[
        ("src/pages/home.ts", "import { Button } from '@/components/button';\nimport 'src/lib/util';"),
        ("src/components/button.ts", "export const Button = 1;"),
        ("src/lib/util.ts", ""),
    ]);
    let resolver =
        crate::PathResolver::new(project.options().alias("@/*", "src/")).unwrap();
    let runtime: Arc<dyn crate::Runtime> = Arc::new(TestRuntime::new(project.root.clone()));

    let graph = GraphBuilder::new(resolver, BuildOptions::default())
        .build("src/pages/home", runtime)
        .await
        .unwrap()
        .unwrap();

    let root = graph.root();
    assert_eq!(import_target(&graph, root, 0), Some(project.path("src/components/button.ts")));
    assert_eq!(import_target(&graph, root, 1), Some(project.path("src/lib/util.ts")));
}

#[tokio::test]
async fn test_builds_are_repeatable() {
    let project = Project::new(&[
        ("index.ts", "import './a';\nimport './b';"),
        ("a.ts", "import './b';"),
        ("b.ts", "import './a';"),
    ]);

    let first = project.build("index.ts").await.unwrap().unwrap();
    let second = project.build("index.ts").await.unwrap().unwrap();

    let paths = |graph: &crate::ModuleGraph| {
        let mut paths: Vec<_> = graph.modules().map(|m| m.path.clone()).collect();
        paths.sort();
        paths
    };
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.find_cycles().len(), 1);
}
