//! # carve-graph
//!
//! Import graph construction and chunk assignment for code splitting.
//!
//! ## Overview
//!
//! Given an entry point, `carve-graph` resolves every static `import` and
//! `export .. from` specifier to a file on disk, parses each file once, and
//! produces a [`ModuleGraph`]. A [`ChunkRules`] table then places every
//! module into a named chunk.
//!
//! - **Pattern normalization**: alias, ignore and chunk rules accept strings or
//!   compiled regexes ([`pattern`])
//! - **Path resolution**: aliases, ignore patterns, extension and `index`
//!   probing ([`resolver`])
//! - **Graph building**: concurrent traversal that keeps declaration order and
//!   terminates on cycles ([`walker`])
//! - **Pluggable I/O**: every filesystem access goes through [`Runtime`]
//!
//! ## Architecture
//!
//! ```text
//!   entry ──► PathResolver ──► Runtime (probe/read)
//!                 ▲                  │
//!                 │                  ▼
//!            GraphBuilder ◄──── parse_module (oxc)
//!                 │
//!                 ▼
//!           ModuleGraph ──► assign_chunks ──► ChunkAssignment
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use carve_graph::{NativeRuntime, ResolverOptions, SplitterOptions, split};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ResolverOptions::new("/path/to/project").alias("@/*", "src/");
//! let options = SplitterOptions::new("src/index.ts", resolver)
//!     .chunk("vendor", "/lib/")
//!     .chunk("ui", "/components/");
//!
//! if let Some(plan) = split(options, Arc::new(NativeRuntime::new())).await? {
//!     for (chunk, modules) in &plan.assignment.chunks {
//!         println!("{chunk}: {} modules", modules.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod chunks;
pub mod export;
pub mod graph;
pub mod import;
pub mod module;
pub mod pattern;
pub mod resolver;
pub mod runtime;
pub mod splitter;
pub mod walker;

#[cfg(test)]
mod tests;

pub use chunks::{ChunkAssignment, ChunkRules, assign_chunks};
pub use export::{ExportStatement, ReExport};
pub use graph::ModuleGraph;
pub use import::{ImportOutcome, ImportStatement, ImportedName};
pub use module::{ModuleId, ModuleNode};
pub use pattern::{Pattern, PatternError, RawPattern, normalize_pattern, normalize_patterns};
pub use resolver::{PathResolver, ResolveResult, ResolverError, ResolverOptions, SkipReason};
pub use splitter::{SplitError, SplitPlan, SplitterOptions, split};
pub use walker::{BuildError, BuildOptions, GraphBuilder, ParseError, ParserPlugin, build_graph};

// Re-export runtime types
pub use runtime::native::NativeRuntime;
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils;
