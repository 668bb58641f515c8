//! Renderer-facing interface
//!
//! The engine never talks to a GPU directly. It emits three commands per
//! rendered surface (create texture, draw text, composite onto a material)
//! through [`ScreenRenderer`], and learns about freed rendering resources
//! through the same trait.

mod commands;
mod text;

pub use commands::{RecordingRenderer, RenderCommand, ScreenRenderer, TextDraw};
pub use text::{render_text_to_surface, FontId, TextAlignment, TextContent};
