//! Command implementations for the Carve CLI.
//!
//! - [`split`] - Assign modules to chunks
//! - [`graph`] - Print the module graph
//! - [`resolve`] - Resolve a single specifier
//! - [`check`] - Validate the configuration
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and the shared [`ProjectArgs`](crate::cli::ProjectArgs).

pub mod check;
pub mod graph;
pub mod resolve;
pub mod split;
pub mod utils;

pub use check::execute as check_execute;
pub use graph::execute as graph_execute;
pub use resolve::execute as resolve_execute;
pub use split::execute as split_execute;
