//! Terminal rendering module
//!
//! Draws into an RGB pixel buffer that is flushed to the terminal with
//! half-block characters, two pixels per cell.

pub mod font;
pub mod pixels;
pub mod scene;

pub use pixels::{PixelBuf, Rgb};
pub use scene::Scene;
