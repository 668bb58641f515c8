//! Rendering command pattern for screen updates
//!
//! # Design Philosophy
//!
//! The renderer is a passive sink that:
//! - Accepts fire-and-forget commands (no acknowledgment channel)
//! - Reports freed resource budget as discrete signals
//! - Knows nothing about hosts, screens or scheduling

use std::collections::VecDeque;

use super::text::{FontId, TextAlignment};
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::scene::RenderObjectId;

/// Arguments of a draw-aligned-text command
#[derive(Debug, Clone, Copy)]
pub struct TextDraw<'a> {
    /// Font to draw with
    pub font: &'a FontId,
    /// Top-left origin inside the target texture
    pub origin: Vec2,
    /// Text color
    pub color: Color,
    /// Text to draw
    pub text: &'a str,
    /// Font scale multiplier
    pub scale: f32,
    /// Wrap width; infinite disables wrapping
    pub max_width: f32,
    /// Name of the texture to draw into
    pub target: &'a str,
    /// Width of the target texture in pixels
    pub target_width: u32,
    /// Horizontal alignment
    pub alignment: TextAlignment,
}

/// Command sink and resource signal source implemented by rendering backends
pub trait ScreenRenderer {
    /// Create (or recreate) an offscreen texture
    fn create_texture(&mut self, name: &str, width: u32, height: u32);

    /// Draw aligned text into an offscreen texture
    fn draw_aligned_text(&mut self, draw: &TextDraw<'_>);

    /// Composite an offscreen texture onto a material of a render object
    fn composite_to_surface(
        &mut self,
        render_object: RenderObjectId,
        material: &str,
        texture: &str,
        background: Color,
    );

    /// Next pending "resources freed" signal, with the freed budget
    fn poll_resources_freed(&mut self) -> Option<u64> {
        None
    }
}

/// Recorded form of a renderer command
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// See [`ScreenRenderer::create_texture`]
    CreateTexture {
        /// Texture name
        name: String,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// See [`ScreenRenderer::draw_aligned_text`]
    DrawAlignedText {
        /// Font to draw with
        font: FontId,
        /// Origin inside the texture
        origin: Vec2,
        /// Text color
        color: Color,
        /// Text to draw
        text: String,
        /// Font scale multiplier
        scale: f32,
        /// Wrap width
        max_width: f32,
        /// Target texture name
        target: String,
        /// Target texture width
        target_width: u32,
        /// Horizontal alignment
        alignment: TextAlignment,
    },
    /// See [`ScreenRenderer::composite_to_surface`]
    CompositeToSurface {
        /// Render object receiving the texture
        render_object: RenderObjectId,
        /// Material slot on the render object
        material: String,
        /// Source texture name
        texture: String,
        /// Background color
        background: Color,
    },
}

/// Renderer that records commands instead of drawing
///
/// Used by tools and tests; freed-resource signals are queued with
/// [`RecordingRenderer::push_resources_freed`] and handed out in FIFO order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
    freed: VecDeque<u64>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, in submission order
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take all recorded commands, leaving the recorder empty
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Names of textures created so far, in order
    #[must_use]
    pub fn created_textures(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::CreateTexture { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Queue a freed-resource signal
    pub fn push_resources_freed(&mut self, budget: u64) {
        self.freed.push_back(budget);
    }
}

impl ScreenRenderer for RecordingRenderer {
    fn create_texture(&mut self, name: &str, width: u32, height: u32) {
        log::trace!("create texture {name} {width}x{height}");
        self.commands.push(RenderCommand::CreateTexture {
            name: name.to_string(),
            width,
            height,
        });
    }

    fn draw_aligned_text(&mut self, draw: &TextDraw<'_>) {
        self.commands.push(RenderCommand::DrawAlignedText {
            font: draw.font.clone(),
            origin: draw.origin,
            color: draw.color,
            text: draw.text.to_string(),
            scale: draw.scale,
            max_width: draw.max_width,
            target: draw.target.to_string(),
            target_width: draw.target_width,
            alignment: draw.alignment,
        });
    }

    fn composite_to_surface(
        &mut self,
        render_object: RenderObjectId,
        material: &str,
        texture: &str,
        background: Color,
    ) {
        self.commands.push(RenderCommand::CompositeToSurface {
            render_object,
            material: material.to_string(),
            texture: texture.to_string(),
            background,
        });
    }

    fn poll_resources_freed(&mut self) -> Option<u64> {
        self.freed.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freed_signals_are_fifo() {
        let mut renderer = RecordingRenderer::new();
        renderer.push_resources_freed(10);
        renderer.push_resources_freed(20);

        assert_eq!(renderer.poll_resources_freed(), Some(10));
        assert_eq!(renderer.poll_resources_freed(), Some(20));
        assert_eq!(renderer.poll_resources_freed(), None);
    }

    #[test]
    fn test_take_commands_empties_recorder() {
        let mut renderer = RecordingRenderer::new();
        renderer.create_texture("a", 1, 1);
        renderer.create_texture("b", 2, 2);
        assert_eq!(renderer.created_textures(), vec!["a", "b"]);

        let taken = renderer.take_commands();
        assert_eq!(taken.len(), 2);
        assert!(renderer.commands().is_empty());
    }
}
