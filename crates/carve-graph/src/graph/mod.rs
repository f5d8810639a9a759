//! The finished import graph.
//!
//! Modules live in an arena indexed by [`ModuleId`]. Edges are ids, so shared
//! dependencies appear once and cycles are plain back-references.

mod cycles;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::import::ImportStatement;
use crate::module::{ModuleId, ModuleNode};

/// Immutable import graph rooted at the entry module.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    modules: IndexMap<PathBuf, ModuleNode>,
    root: ModuleId,
}

impl ModuleGraph {
    pub(crate) fn from_parts(modules: IndexMap<PathBuf, ModuleNode>, root: ModuleId) -> Self {
        Self { modules, root }
    }

    pub fn root_id(&self) -> ModuleId {
        self.root
    }

    /// The entry module.
    pub fn root(&self) -> &ModuleNode {
        &self.modules[self.root.index()]
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleNode> {
        self.modules.get_index(id.index()).map(|(_, node)| node)
    }

    /// Look a module up by canonical path.
    pub fn get(&self, path: &Path) -> Option<&ModuleNode> {
        self.modules.get(path)
    }

    pub fn id_of(&self, path: &Path) -> Option<ModuleId> {
        self.modules.get_index_of(path).map(ModuleId::from_index)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.modules.contains_key(path)
    }

    /// All modules in discovery order.
    pub fn modules(&self) -> impl ExactSizeIterator<Item = &ModuleNode> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The module an import resolved to.
    pub fn target(&self, import: &ImportStatement) -> Option<&ModuleNode> {
        import.target().and_then(|id| self.module(id))
    }

    /// Distinct modules `id` depends on through imports and followed
    /// re-exports, in declaration order.
    pub fn dependencies(&self, id: ModuleId) -> Vec<ModuleId> {
        let Some(node) = self.module(id) else {
            return Vec::new();
        };

        let mut deps = Vec::new();
        let targets = node
            .imports
            .iter()
            .map(ImportStatement::target)
            .chain(node.exports.iter().map(|export| export.target()));
        for target in targets.flatten() {
            if !deps.contains(&target) {
                deps.push(target);
            }
        }
        deps
    }

    /// Modules that depend on `id`, in discovery order.
    pub fn dependents(&self, id: ModuleId) -> Vec<ModuleId> {
        self.modules
            .values()
            .filter(|node| self.dependencies(node.id).contains(&id))
            .map(|node| node.id)
            .collect()
    }

    /// Module ids in depth-first order from the root, following edges in
    /// declaration order. Each module is listed once.
    pub fn walk_order(&self) -> Vec<ModuleId> {
        let mut seen = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            order.push(id);
            let deps = self.dependencies(id);
            stack.extend(deps.into_iter().rev().filter(|dep| !seen[dep.index()]));
        }
        order
    }
}

impl Serialize for ModuleGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let modules: Vec<&ModuleNode> = self.modules.values().collect();
        let mut state = serializer.serialize_struct("ModuleGraph", 2)?;
        state.serialize_field("root", &self.root)?;
        state.serialize_field("modules", &modules)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{ImportOutcome, ImportedName};
    use crate::resolver::SkipReason;

    fn node(id: u32, path: &str, deps: &[u32]) -> ModuleNode {
        let mut node = ModuleNode::new(ModuleId(id), PathBuf::from(path));
        node.imports = deps
            .iter()
            .map(|dep| ImportStatement {
                source: format!("./{dep}"),
                names: vec![ImportedName::Default],
                type_only: false,
                outcome: ImportOutcome::from(ModuleId(*dep)),
            })
            .collect();
        node
    }

    pub(crate) fn graph(edges: &[&[u32]]) -> ModuleGraph {
        let modules = edges
            .iter()
            .enumerate()
            .map(|(i, deps)| {
                let path = format!("/p/{i}.js");
                (PathBuf::from(&path), node(i as u32, &path, deps))
            })
            .collect();
        ModuleGraph::from_parts(modules, ModuleId(0))
    }

    #[test]
    fn dependencies_are_distinct_and_ordered() {
        let g = graph(&[&[2, 1, 2], &[], &[]]);
        assert_eq!(g.dependencies(ModuleId(0)), vec![ModuleId(2), ModuleId(1)]);
        assert_eq!(g.dependents(ModuleId(2)), vec![ModuleId(0)]);
    }

    #[test]
    fn skipped_imports_have_no_target() {
        let mut g = graph(&[&[]]);
        g.modules[0].imports.push(ImportStatement {
            source: "lodash".into(),
            names: vec![],
            type_only: false,
            outcome: SkipReason::NotFound.into(),
        });
        assert!(g.dependencies(ModuleId(0)).is_empty());
        assert!(g.target(&g.root().imports[0]).is_none());
    }

    #[test]
    fn walk_order_visits_each_module_once() {
        let g = graph(&[&[1, 2], &[2, 0], &[]]);
        assert_eq!(g.walk_order(), vec![ModuleId(0), ModuleId(1), ModuleId(2)]);
    }

    #[test]
    fn lookup_by_path_and_id() {
        let g = graph(&[&[1], &[]]);
        let path = Path::new("/p/1.js");
        assert_eq!(g.id_of(path), Some(ModuleId(1)));
        assert_eq!(g.get(path).map(|n| n.id), Some(ModuleId(1)));
        assert!(g.module(ModuleId(7)).is_none());
        assert_eq!(g.root().path, PathBuf::from("/p/0.js"));
    }

    #[test]
    fn serializes_root_and_modules() {
        let g = graph(&[&[1], &[]]);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["root"], 0);
        assert_eq!(json["modules"][0]["path"], "/p/0.js");
        assert_eq!(json["modules"][0]["imports"][0]["outcome"]["status"], "resolved");
        assert_eq!(json["modules"][0]["imports"][0]["outcome"]["module"], 1);
    }
}
