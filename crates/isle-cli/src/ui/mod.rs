//! Terminal output: status messages and the bundle summary.
//!
//! ```no_run
//! use isle_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Bundled 3 pages");
//! ui::warning("No islands found");
//! ```

mod messages;
mod summary;

use owo_colors::{OwoColorize, Style};
use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success, warning};
pub use summary::{format_duration, print_bundle_summary, skip_label, summary_line};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to terminal
/// detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status output is colored.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn paint(text: &str, style: Style) -> String {
    if COLORS.load(Ordering::Relaxed) {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
