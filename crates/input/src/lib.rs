//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. The mapping is
//! stateless; auto-repeat comes from the terminal itself.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_theme_key, should_quit};
