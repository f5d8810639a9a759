//! Terminal UI utilities: status messages and listings.
//!
//! Status messages go to stderr; listings go to stdout so they can be piped.
//!
//! # Examples
//!
//! ```no_run
//! use carve_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Planned 3 chunks");
//! ui::warning("Entry point could not be resolved");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, Style};

pub use format::{display_path, render_assignment, render_graph, render_resolution};
pub use messages::{info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Decide once whether output is coloured. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && crate::logger::should_use_colors(), Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Apply `style` when colours are enabled.
pub(crate) fn paint(text: impl std::fmt::Display, style: Style) -> String {
    if colors_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
