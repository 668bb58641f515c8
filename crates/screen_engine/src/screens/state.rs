//! Per-screen mutable state

use crate::render::TextContent;

/// Content of one screen plus whether its texture is out of date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    content: TextContent,
    dirty: bool,
}

impl ScreenState {
    /// Current content
    #[must_use]
    pub const fn content(&self) -> &TextContent {
        &self.content
    }

    /// Whether the rendered texture no longer reflects the content
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write one field if it differs; returns whether anything changed
    pub(crate) fn write<T: PartialEq>(
        &mut self,
        field: impl FnOnce(&mut TextContent) -> &mut T,
        value: T,
    ) -> bool {
        let slot = field(&mut self.content);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}
