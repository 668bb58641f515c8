//! Abstract scene interface consumed by the screen scheduler
//!
//! This abstraction allows swapping the world representation (full ECS,
//! editor preview, headless test harness) without changing the scheduler.

use crate::ecs::Entity;
use crate::foundation::math::{self, Vec3};

/// Renderer-side identifier of one drawable instance of an entity
pub type RenderObjectId = u32;

/// Render object id the renderer uses for "not allocated"
pub const INVALID_RENDER_OBJECT: RenderObjectId = u32::MAX;

/// The active camera as seen by the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    /// Camera position in world space
    pub position: Vec3,
    /// Unit view direction
    pub forward: Vec3,
}

impl Viewpoint {
    /// Create a viewpoint; `forward` is normalized
    ///
    /// A zero-length direction falls back to looking down -Z.
    #[must_use]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = forward
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
        Self { position, forward }
    }

    /// Point `distance` units straight ahead of the camera
    #[must_use]
    pub fn point_ahead(&self, distance: f32) -> Vec3 {
        self.position + self.forward * distance
    }

    /// Distance from the camera to `point`
    #[must_use]
    pub fn distance_to(&self, point: &Vec3) -> f32 {
        math::distance(&self.position, point)
    }

    /// Squared distance from the camera to `point`
    #[must_use]
    pub fn distance_squared_to(&self, point: &Vec3) -> f32 {
        math::distance_squared(&self.position, point)
    }
}

/// State of a single-screen legacy panel, maintained by its own renderer logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegacySurfaceStatus {
    /// The panel's texture no longer matches its content
    pub stale: bool,
    /// The panel is configured to show text at all
    pub shown: bool,
}

/// Read access to the simulation plus the hooks the scheduler needs
pub trait Scene {
    /// Active camera, or `None` when there is no local viewpoint
    fn viewpoint(&self) -> Option<Viewpoint>;

    /// Whether the entity is currently part of the live scene
    fn in_scene(&self, entity: Entity) -> bool;

    /// World-space centre of the entity
    fn position(&self, entity: Entity) -> Option<Vec3>;

    /// Render objects the entity is drawn with, `None` if it has no render component
    fn render_object_ids(&self, entity: Entity) -> Option<&[RenderObjectId]>;

    /// Entities intersecting a sphere
    fn query_sphere(&self, center: Vec3, radius: f32) -> Vec<Entity>;

    /// Legacy panel state, `None` if the entity is not a legacy panel
    fn legacy_surface(&self, _entity: Entity) -> Option<LegacySurfaceStatus> {
        None
    }

    /// Run the legacy panel's own refresh routine under `budget`
    fn refresh_legacy_surface(&mut self, _entity: Entity, _budget: u64) {}

    /// In the scene and closer to the viewpoint than `radius`
    fn is_within_range(&self, entity: Entity, radius: f32) -> bool {
        if !self.in_scene(entity) {
            return false;
        }
        let (Some(view), Some(position)) = (self.viewpoint(), self.position(entity)) else {
            return false;
        };
        view.distance_squared_to(&position) < radius * radius
    }
}
