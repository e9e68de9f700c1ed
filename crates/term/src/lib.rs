//! Terminal front end.
//!
//! A small game-oriented rendering layer: the view draws a core snapshot into
//! a framebuffer of styled cells, and the renderer diff-encodes framebuffers
//! to the terminal with `crossterm`. Board cells are drawn two columns wide to
//! make up for the glyph aspect ratio.
//!
//! Also home to the colour palette, accent themes and the theme preference
//! file.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{flash_intensity, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{piece_color, Preferences, Theme};
