//! Multi-screen host: dirty tracking and round-robin draining

use std::sync::Arc;

use super::{ScreenError, ScreenLayout, ScreenState};
use crate::ecs::Entity;
use crate::render::{render_text_to_surface, ScreenRenderer, TextContent};
use crate::scene::Scene;

/// An entity carrying a fixed set of independently updatable screens
///
/// The layout is shared with every host of the same type; the screen states
/// belong to this host alone. `dirty_count` always equals the number of dirty
/// screens and is maintained incrementally.
#[derive(Debug)]
pub struct MultiScreenHost {
    entity: Entity,
    layout: Arc<ScreenLayout>,
    screens: Vec<ScreenState>,
    dirty_count: usize,
    cursor: usize,
}

impl MultiScreenHost {
    /// Create a host with every screen clean
    #[must_use]
    pub fn new(entity: Entity, layout: Arc<ScreenLayout>) -> Self {
        let screens = vec![ScreenState::default(); layout.len()];
        Self {
            entity,
            layout,
            screens,
            dirty_count: 0,
            cursor: 0,
        }
    }

    /// Owning entity
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    /// Shared layout
    #[must_use]
    pub fn layout(&self) -> &Arc<ScreenLayout> {
        &self.layout
    }

    /// All screen states, in layout order
    #[must_use]
    pub fn screens(&self) -> &[ScreenState] {
        &self.screens
    }

    /// State of the screen at `index`
    #[must_use]
    pub fn screen(&self, index: usize) -> Option<&ScreenState> {
        self.screens.get(index)
    }

    /// Number of dirty screens
    #[must_use]
    pub const fn dirty_count(&self) -> usize {
        self.dirty_count
    }

    /// At least one screen is dirty
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty_count > 0
    }

    /// Index the next drain starts scanning from
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resolve a screen id through the layout
    pub fn index_of(&self, id: &str) -> Result<usize, ScreenError> {
        self.layout
            .index_of(id)
            .filter(|&index| index < self.screens.len())
            .ok_or_else(|| ScreenError::UnknownScreenId { id: id.to_string() })
    }

    /// In the live scene and within `radius` of the viewpoint
    pub fn is_visible<S: Scene + ?Sized>(&self, scene: &S, radius: f32) -> bool {
        scene.is_within_range(self.entity, radius)
    }

    /// Resource cost of rasterizing screen `index` onto `surfaces` render objects
    #[must_use]
    pub fn screen_cost(&self, index: usize, surfaces: usize) -> Option<u64> {
        let entry = self.layout.entry(index)?;
        let surfaces = u64::try_from(surfaces).unwrap_or(u64::MAX);
        Some(entry.pixel_count().saturating_mul(surfaces))
    }

    /// Write a content field of screen `index`
    ///
    /// Returns true only when this write takes the host from no dirty screens
    /// to one, which is when the host must be registered for updates.
    pub(crate) fn write_field<T: PartialEq>(
        &mut self,
        index: usize,
        field: impl FnOnce(&mut TextContent) -> &mut T,
        value: T,
    ) -> bool {
        let Some(screen) = self.screens.get_mut(index) else {
            return false;
        };
        if !screen.write(field, value) {
            return false;
        }
        self.mark_dirty(index)
    }

    fn mark_dirty(&mut self, index: usize) -> bool {
        let screen = &mut self.screens[index];
        if screen.is_dirty() {
            return false;
        }
        screen.set_dirty(true);
        self.dirty_count += 1;
        self.dirty_count == 1
    }

    /// Rasterize exactly one dirty screen that fits `budget`
    ///
    /// Scans round-robin from the cursor. A dirty screen whose cost is at or
    /// above the budget is skipped and stays dirty, so an oversized screen
    /// never starves cheaper ones. Returns false when nothing was drawn.
    pub fn drain_one<S, R>(&mut self, scene: &S, renderer: &mut R, budget: u64) -> bool
    where
        S: Scene + ?Sized,
        R: ScreenRenderer + ?Sized,
    {
        let Some(render_objects) = scene.render_object_ids(self.entity) else {
            return false;
        };
        let count = self.screens.len();

        for offset in 0..count {
            let index = (self.cursor + offset) % count;
            if !self.screens[index].is_dirty() {
                continue;
            }

            let Some(cost) = self.screen_cost(index, render_objects.len()) else {
                continue;
            };
            let entry = &self.layout.entries()[index];
            if cost >= budget {
                log::trace!(
                    "{}: screen '{}' costs {cost}, budget {budget}; skipped",
                    self.entity,
                    entry.id
                );
                continue;
            }

            let size = entry.texture_size();
            for &render_object in render_objects {
                let texture = format!("TextOffscreenTexture_{render_object}x{index}");
                render_text_to_surface(
                    renderer,
                    render_object,
                    &texture,
                    &entry.material_name,
                    size,
                    self.screens[index].content(),
                );
            }

            self.screens[index].set_dirty(false);
            self.dirty_count -= 1;
            self.cursor = (index + 1) % count;
            log::trace!(
                "{}: drained screen '{}', {} left",
                self.entity,
                entry.id,
                self.dirty_count
            );
            return true;
        }

        false
    }
}
