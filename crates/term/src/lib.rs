//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It paints engine snapshots into
//! a framebuffer that can be flushed to a terminal backend, without any widget
//! or layout framework.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Keep painting pure so it can be tested without a terminal
//! - Allow control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, GameView, Viewport};
pub use renderer::TerminalRenderer;
