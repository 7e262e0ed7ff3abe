//! Built-in handlers: a fixed greeting for a slash command and a text echo.
//!
//! Both are plain [`ebot_core::Handler`] implementations; main registers them
//! on the dispatcher in the order that should win.

mod command;
mod echo;

pub use command::CommandHandler;
pub use echo::{EchoHandler, DEFAULT_ECHO_PREFIX};
