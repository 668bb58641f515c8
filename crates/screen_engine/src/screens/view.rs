//! Per-screen accessor used by game logic and scripts

use super::{MultiScreenHost, ScreenState};
use crate::foundation::collections::HostHandle;
use crate::foundation::color::Color;
use crate::render::{FontId, TextAlignment, TextContent};
use crate::scene::Scene;
use crate::scheduler::PendingSet;

/// Everything a view needs to enroll its host in the scheduler's pending set
pub(crate) struct Registration<'a> {
    pub(crate) handle: HostHandle,
    pub(crate) pending: &'a mut PendingSet,
    pub(crate) scene: &'a dyn Scene,
    pub(crate) visibility_radius: f32,
}

/// Change-detecting access to one screen of a host
///
/// Obtained from [`crate::scheduler::ScreenUpdateScheduler::screen`]. Every
/// setter is a no-op when the value is unchanged; otherwise it marks the
/// screen dirty, and the host's first dirty screen enrolls the host for
/// updates if it is currently visible.
pub struct ScreenView<'a> {
    host: &'a mut MultiScreenHost,
    index: usize,
    registration: Registration<'a>,
}

impl<'a> ScreenView<'a> {
    pub(crate) fn new(
        host: &'a mut MultiScreenHost,
        index: usize,
        registration: Registration<'a>,
    ) -> Self {
        Self {
            host,
            index,
            registration,
        }
    }

    /// Position of this screen in the host's layout
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Full state of the screen
    #[must_use]
    pub fn state(&self) -> &ScreenState {
        &self.host.screens()[self.index]
    }

    fn content(&self) -> &TextContent {
        self.state().content()
    }

    /// Displayed text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.content().text
    }

    /// Replace the displayed text
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.apply(|c| &mut c.text, text.into())
    }

    /// Font scale
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.content().scale
    }

    /// Change the font scale
    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.apply(|c| &mut c.scale, scale)
    }

    /// Font reference
    #[must_use]
    pub fn font(&self) -> &FontId {
        &self.content().font
    }

    /// Change the font
    pub fn set_font(&mut self, font: FontId) -> &mut Self {
        self.apply(|c| &mut c.font, font)
    }

    /// Font definition name
    #[must_use]
    pub fn font_name(&self) -> &str {
        self.content().font.name()
    }

    /// Change the font by definition name
    pub fn set_font_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_font(FontId::new(name))
    }

    /// Text color
    #[must_use]
    pub fn foreground(&self) -> Color {
        self.content().foreground
    }

    /// Change the text color
    pub fn set_foreground(&mut self, color: Color) -> &mut Self {
        self.apply(|c| &mut c.foreground, color)
    }

    /// Background color
    #[must_use]
    pub fn background(&self) -> Color {
        self.content().background
    }

    /// Change the background color
    pub fn set_background(&mut self, color: Color) -> &mut Self {
        self.apply(|c| &mut c.background, color)
    }

    /// Text alignment
    #[must_use]
    pub fn alignment(&self) -> TextAlignment {
        self.content().alignment
    }

    /// Change the text alignment
    pub fn set_alignment(&mut self, alignment: TextAlignment) -> &mut Self {
        self.apply(|c| &mut c.alignment, alignment)
    }

    /// Text alignment as its numeric value
    #[must_use]
    pub fn alignment_index(&self) -> i32 {
        self.alignment().index()
    }

    /// Change the text alignment by numeric value; unknown values are ignored
    pub fn set_alignment_index(&mut self, index: i32) -> &mut Self {
        match TextAlignment::from_index(index) {
            Some(alignment) => self.set_alignment(alignment),
            None => {
                log::warn!("{}: ignoring unknown alignment {index}", self.host.entity());
                self
            }
        }
    }

    fn apply<T: PartialEq>(
        &mut self,
        field: impl FnOnce(&mut TextContent) -> &mut T,
        value: T,
    ) -> &mut Self {
        if self.host.write_field(self.index, field, value)
            && self
                .host
                .is_visible(self.registration.scene, self.registration.visibility_radius)
            && self.registration.pending.insert(self.registration.handle)
        {
            log::debug!("{} queued for screen updates", self.host.entity());
        }
        self
    }
}
