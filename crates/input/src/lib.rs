//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. The engine never
//! sees keys; the driver translates them here and forwards intents.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
