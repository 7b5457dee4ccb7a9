//! isle CLI - bundle a static site's islands into one script per page.
//!
//! The command-line front end for [`isle_bundler`]. It discovers every HTML
//! page of a finished build, runs the islands integration over them and
//! reports what happened.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - Command implementations
//! - [`config`] - `isle.config.json` loading and validation
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and the bundle summary
//!
//! # Example
//!
//! ```rust
//! use isle_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
