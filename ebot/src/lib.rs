//! # ebot
//!
//! Application crate: env config, CLI, the built-in greeting/echo handlers,
//! and the poll/dispatch runner. Kept as a library so integration tests and
//! the example binaries drive the same pieces the `ebot` binary runs.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::Config;
pub use handlers::{CommandHandler, EchoHandler, DEFAULT_ECHO_PREFIX};
pub use runner::{process_batch, run_bot};
