//! In-memory scene with brute-force spatial queries
//!
//! Good enough for a few thousand entities; the sphere query is linear.

use std::collections::HashMap;

use super::{LegacySurfaceStatus, RenderObjectId, Scene, Viewpoint};
use crate::ecs::Entity;
use crate::foundation::math::{self, Vec3};
use crate::links::LinkResolver;

/// Legacy panel bookkeeping
#[derive(Debug, Clone, Default)]
struct LegacyPanel {
    status: LegacySurfaceStatus,
    /// Budgets passed to each refresh, in call order
    refreshes: Vec<u64>,
}

#[derive(Debug, Clone)]
struct SceneEntity {
    position: Vec3,
    in_scene: bool,
    render_objects: Option<Vec<RenderObjectId>>,
    /// Construct (grid) the entity belongs to; links resolve within one construct
    construct: u32,
    name: Option<String>,
    legacy: Option<LegacyPanel>,
}

/// Minimal scene: entities with positions, render objects and optional legacy panels
#[derive(Debug, Default)]
pub struct SimpleScene {
    next_entity_id: u32,
    entities: HashMap<Entity, SceneEntity>,
    viewpoint: Option<Viewpoint>,
}

impl SimpleScene {
    /// Create an empty scene with no viewpoint
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity at `position`, live in the scene, without render objects
    pub fn spawn(&mut self, position: Vec3) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(
            entity,
            SceneEntity {
                position,
                in_scene: true,
                render_objects: None,
                construct: 0,
                name: None,
                legacy: None,
            },
        );
        entity
    }

    /// Remove an entity entirely
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity).is_some()
    }

    /// Number of entities, in scene or not
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Set or clear the active camera
    pub fn set_viewpoint(&mut self, viewpoint: Option<Viewpoint>) {
        self.viewpoint = viewpoint;
    }

    /// Move an entity
    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.position = position;
        }
    }

    /// Add the entity to, or remove it from, the live scene
    pub fn set_in_scene(&mut self, entity: Entity, in_scene: bool) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.in_scene = in_scene;
        }
    }

    /// Give the entity a render component drawn through `ids`
    pub fn set_render_objects(&mut self, entity: Entity, ids: Vec<RenderObjectId>) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.render_objects = Some(ids);
        }
    }

    /// Assign the entity to a construct
    pub fn set_construct(&mut self, entity: Entity, construct: u32) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.construct = construct;
        }
    }

    /// Set the player-facing name of an entity
    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.name = Some(name.into());
        }
    }

    /// Player-facing name of an entity
    #[must_use]
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(&entity)?.name.as_deref()
    }

    /// Turn the entity into a legacy single-screen panel
    pub fn add_legacy_surface(&mut self, entity: Entity, shown: bool) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.legacy = Some(LegacyPanel {
                status: LegacySurfaceStatus { stale: false, shown },
                refreshes: Vec::new(),
            });
        }
    }

    /// Flag a legacy panel's texture as out of date
    pub fn mark_legacy_stale(&mut self, entity: Entity) {
        if let Some(panel) = self.entities.get_mut(&entity).and_then(|e| e.legacy.as_mut()) {
            panel.status.stale = true;
        }
    }

    /// Budgets each refresh of the legacy panel was given
    #[must_use]
    pub fn legacy_refreshes(&self, entity: Entity) -> &[u64] {
        self.entities
            .get(&entity)
            .and_then(|e| e.legacy.as_ref())
            .map(|panel| panel.refreshes.as_slice())
            .unwrap_or_default()
    }
}

impl Scene for SimpleScene {
    fn viewpoint(&self) -> Option<Viewpoint> {
        self.viewpoint
    }

    fn in_scene(&self, entity: Entity) -> bool {
        self.entities.get(&entity).is_some_and(|e| e.in_scene)
    }

    fn position(&self, entity: Entity) -> Option<Vec3> {
        self.entities.get(&entity).map(|e| e.position)
    }

    fn render_object_ids(&self, entity: Entity) -> Option<&[RenderObjectId]> {
        self.entities.get(&entity)?.render_objects.as_deref()
    }

    fn query_sphere(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        let radius_squared = radius * radius;
        let mut found: Vec<Entity> = self
            .entities
            .iter()
            .filter(|(_, e)| {
                e.in_scene && math::distance_squared(&e.position, &center) <= radius_squared
            })
            .map(|(&entity, _)| entity)
            .collect();
        // Stable order keeps tie-breaking deterministic
        found.sort_unstable();
        found
    }

    fn legacy_surface(&self, entity: Entity) -> Option<LegacySurfaceStatus> {
        self.entities.get(&entity)?.legacy.as_ref().map(|panel| panel.status)
    }

    fn refresh_legacy_surface(&mut self, entity: Entity, budget: u64) {
        if let Some(panel) = self.entities.get_mut(&entity).and_then(|e| e.legacy.as_mut()) {
            panel.refreshes.push(budget);
            panel.status.stale = false;
        }
    }
}

impl LinkResolver for SimpleScene {
    fn find_linked_block(&self, source: Entity, name: &str) -> Option<Entity> {
        let construct = self.entities.get(&source)?.construct;
        let mut candidates: Vec<Entity> = self
            .entities
            .iter()
            .filter(|(_, e)| e.construct == construct && e.render_objects.is_some())
            .filter(|(_, e)| e.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .map(|(&entity, _)| entity)
            .collect();
        candidates.sort_unstable();
        candidates.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_sphere_skips_entities_outside_scene() {
        let mut scene = SimpleScene::new();
        let near = scene.spawn(Vec3::new(0.0, 0.0, 5.0));
        let hidden = scene.spawn(Vec3::new(0.0, 0.0, 6.0));
        let far = scene.spawn(Vec3::new(0.0, 0.0, 50.0));
        scene.set_in_scene(hidden, false);

        let found = scene.query_sphere(Vec3::zeros(), 10.0);
        assert_eq!(found, vec![near]);
        assert!(!found.contains(&far));
    }

    #[test]
    fn test_despawn_removes_entity_from_queries() {
        let mut scene = SimpleScene::new();
        let kept = scene.spawn(Vec3::zeros());
        let gone = scene.spawn(Vec3::new(1.0, 0.0, 0.0));
        scene.set_render_objects(gone, vec![3]);
        assert_eq!(scene.entity_count(), 2);

        assert!(scene.despawn(gone));
        assert!(!scene.despawn(gone));
        assert_eq!(scene.entity_count(), 1);
        assert!(!scene.in_scene(gone));
        assert_eq!(scene.render_object_ids(gone), None);
        assert_eq!(scene.query_sphere(Vec3::zeros(), 10.0), vec![kept]);
    }

    #[test]
    fn test_is_within_range_requires_viewpoint() {
        let mut scene = SimpleScene::new();
        let entity = scene.spawn(Vec3::new(0.0, 0.0, -10.0));
        assert!(!scene.is_within_range(entity, 200.0));

        scene.set_viewpoint(Some(Viewpoint::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0))));
        assert!(scene.is_within_range(entity, 200.0));
        assert!(!scene.is_within_range(entity, 10.0), "boundary is exclusive");

        scene.set_in_scene(entity, false);
        assert!(!scene.is_within_range(entity, 200.0));
    }

    #[test]
    fn test_legacy_refresh_clears_stale() {
        let mut scene = SimpleScene::new();
        let panel = scene.spawn(Vec3::zeros());
        scene.add_legacy_surface(panel, true);
        scene.mark_legacy_stale(panel);
        assert_eq!(
            scene.legacy_surface(panel),
            Some(LegacySurfaceStatus { stale: true, shown: true })
        );

        scene.refresh_legacy_surface(panel, 4096);
        assert!(!scene.legacy_surface(panel).expect("panel").stale);
        assert_eq!(scene.legacy_refreshes(panel), &[4096]);
    }

    #[test]
    fn test_link_resolution_stays_on_construct() {
        let mut scene = SimpleScene::new();
        let panel = scene.spawn(Vec3::zeros());
        let local = scene.spawn(Vec3::zeros());
        let remote = scene.spawn(Vec3::zeros());
        scene.set_name(local, "Hangar Sign");
        scene.set_render_objects(local, vec![7]);
        scene.set_name(remote, "Hangar Sign");
        scene.set_render_objects(remote, vec![8]);
        scene.set_construct(remote, 1);

        assert_eq!(scene.find_linked_block(panel, "hangar sign"), Some(local));
        assert_eq!(scene.find_linked_block(panel, "Missing"), None);
    }
}
