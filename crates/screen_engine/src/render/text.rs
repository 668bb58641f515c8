//! Text content and the shared rasterize-to-surface routine

use serde::{Deserialize, Serialize};

use super::{ScreenRenderer, TextDraw};
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::scene::RenderObjectId;

/// Horizontal text alignment inside a screen texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    /// Flush left
    #[default]
    Left,
    /// Centred
    Center,
    /// Flush right
    Right,
}

impl TextAlignment {
    /// Numeric value used by scripting interfaces
    #[must_use]
    pub const fn index(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Center => 2,
        }
    }

    /// Inverse of [`TextAlignment::index`]
    #[must_use]
    pub const fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Center),
            _ => None,
        }
    }
}

/// Opaque reference to a font definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(String);

impl FontId {
    /// Reference a font by its definition name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Definition name of the font
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for FontId {
    fn default() -> Self {
        Self::new("Debug")
    }
}

/// Everything needed to rasterize one screen
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    /// Text to draw
    pub text: String,
    /// Font scale multiplier
    pub scale: f32,
    /// Font to draw with
    pub font: FontId,
    /// Text color
    pub foreground: Color,
    /// Color behind the text
    pub background: Color,
    /// Horizontal alignment
    pub alignment: TextAlignment,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            scale: 1.0,
            font: FontId::default(),
            foreground: Color::WHITE,
            background: Color::BLACK,
            alignment: TextAlignment::Left,
        }
    }
}

/// Rasterize `content` into `texture` and composite it onto `material` of one render object
///
/// Issues create-texture, draw-text and composite in that order.
pub fn render_text_to_surface<R: ScreenRenderer + ?Sized>(
    renderer: &mut R,
    render_object: RenderObjectId,
    texture: &str,
    material: &str,
    (width, height): (u32, u32),
    content: &TextContent,
) {
    renderer.create_texture(texture, width, height);
    renderer.draw_aligned_text(&TextDraw {
        font: &content.font,
        origin: Vec2::zeros(),
        color: content.foreground,
        text: &content.text,
        scale: content.scale,
        max_width: f32::INFINITY,
        target: texture,
        target_width: width,
        alignment: content.alignment,
    });
    renderer.composite_to_surface(render_object, material, texture, content.background);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderCommand};

    #[test]
    fn test_alignment_index_round_trip() {
        for alignment in [TextAlignment::Left, TextAlignment::Center, TextAlignment::Right] {
            assert_eq!(TextAlignment::from_index(alignment.index()), Some(alignment));
        }
        assert_eq!(TextAlignment::from_index(7), None);
    }

    #[test]
    fn test_render_text_to_surface_command_order() {
        let mut renderer = RecordingRenderer::new();
        let content = TextContent {
            text: "Hello".to_string(),
            ..TextContent::default()
        };

        render_text_to_surface(&mut renderer, 3, "tex", "ScreenArea", (256, 128), &content);

        let commands = renderer.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            RenderCommand::CreateTexture { name: "tex".to_string(), width: 256, height: 128 }
        );
        assert!(matches!(
            &commands[1],
            RenderCommand::DrawAlignedText { text, target, target_width: 256, .. }
                if text == "Hello" && target == "tex"
        ));
        assert!(matches!(
            &commands[2],
            RenderCommand::CompositeToSurface { render_object: 3, material, .. }
                if material == "ScreenArea"
        ));
    }
}
