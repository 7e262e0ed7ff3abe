//! # ebot-core
//!
//! Core types and traits for the long-polling bot: the [`Update`] that arrives,
//! the [`OutboundMessage`] that goes back, the [`Handler`] predicate/action pair,
//! the [`Bot`] send seam, the error taxonomy, and tracing initialization.
//!
//! This crate is transport-agnostic. `ebot-telegram` maps the Telegram wire
//! format onto these types, and `dispatcher` routes updates through handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{EbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, OutboundMessage, ToCoreUpdate, Update, User};
