//! Logging setup for the isle CLI.
//!
//! Builds a compact `tracing-subscriber` formatter on stderr. The level comes
//! from the global flags, then `RUST_LOG`, then an info default.
//!
//! ```rust,no_run
//! use isle_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Bundling islands");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "isle_cli=debug,isle_bundler=debug,isle_graph=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "isle_cli=info,isle_bundler=info,isle_graph=info";

/// Initialize the tracing subscriber.
///
/// Call once at startup, before anything logs.
///
/// 1. `--verbose`: debug for the isle crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, if set and valid
/// 4. info for the isle crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize the subscriber with an explicit filter.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    // stdout is reserved for command output such as `isle schema`
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger_with_filter(EnvFilter::new("off"), true);
        init_logger_with_filter(EnvFilter::new("off"), true);
    }
}
