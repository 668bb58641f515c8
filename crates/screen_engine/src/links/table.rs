//! Side table of resolved links per legacy panel

use std::collections::HashMap;

use super::parse_link_tag;
use crate::ecs::Entity;
use crate::render::{render_text_to_surface, ScreenRenderer, TextContent};
use crate::scene::{Scene, INVALID_RENDER_OBJECT};

/// Finds link targets by name
pub trait LinkResolver {
    /// Block named `name` (ignoring case) on the same construct as `source`
    fn find_linked_block(&self, source: Entity, name: &str) -> Option<Entity>;
}

/// A resolved link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Block receiving the mirrored content
    pub entity: Entity,
    /// Material on the block
    pub surface: String,
}

/// Resolved links of every watched legacy panel
#[derive(Debug, Default)]
pub struct LinkTable {
    links: HashMap<Entity, Vec<LinkTarget>>,
}

impl LinkTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a panel and resolve its current name
    ///
    /// Returns false if the panel was already watched; its links are still refreshed.
    pub fn watch<L: LinkResolver + ?Sized>(
        &mut self,
        panel: Entity,
        label: &str,
        resolver: &L,
    ) -> bool {
        let newly_watched = !self.links.contains_key(&panel);
        self.on_label_changed(panel, label, resolver);
        newly_watched
    }

    /// Stop tracking a panel and forget its links
    pub fn unwatch(&mut self, panel: Entity) -> bool {
        self.links.remove(&panel).is_some()
    }

    /// Whether the panel is tracked
    #[must_use]
    pub fn is_watched(&self, panel: Entity) -> bool {
        self.links.contains_key(&panel)
    }

    /// Number of tracked panels
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// No panel is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Recompute a panel's links from its new name
    ///
    /// Names that resolve to no block are dropped. A name without a complete
    /// tag keeps whatever links the panel already had.
    pub fn on_label_changed<L: LinkResolver + ?Sized>(
        &mut self,
        panel: Entity,
        label: &str,
        resolver: &L,
    ) {
        let targets = self.links.entry(panel).or_default();
        let Some(specs) = parse_link_tag(label) else {
            return;
        };
        targets.clear();

        for spec in specs {
            match resolver.find_linked_block(panel, &spec.target_name) {
                Some(entity) => targets.push(LinkTarget {
                    entity,
                    surface: spec.surface,
                }),
                None => log::warn!("{panel}: link target '{}' not found", spec.target_name),
            }
        }
        log::debug!("{panel}: {} remote links", targets.len());
    }

    /// Links of a panel
    #[must_use]
    pub fn targets(&self, panel: Entity) -> &[LinkTarget] {
        self.links.get(&panel).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mirror content the panel just rendered onto all of its link targets
    ///
    /// Called after the panel's own render with the same content and texture
    /// geometry. Targets without a render component are skipped, as are
    /// unallocated render objects. Returns the number of surfaces written.
    pub fn mirror<S, R>(
        &self,
        panel: Entity,
        content: &TextContent,
        texture_resolution: u32,
        aspect_ratio: u32,
        scene: &S,
        renderer: &mut R,
    ) -> usize
    where
        S: Scene + ?Sized,
        R: ScreenRenderer + ?Sized,
    {
        let size = (texture_resolution.saturating_mul(aspect_ratio), texture_resolution);
        let mut written = 0;
        for target in self.targets(panel) {
            let Some(render_objects) = scene.render_object_ids(target.entity) else {
                continue;
            };
            for &render_object in render_objects {
                if render_object == INVALID_RENDER_OBJECT {
                    continue;
                }
                let texture = format!("LCDRemoteTexture_{render_object}_{}", target.surface);
                render_text_to_surface(
                    renderer,
                    render_object,
                    &texture,
                    &target.surface,
                    size,
                    content,
                );
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{RecordingRenderer, RenderCommand};
    use crate::scene::SimpleScene;

    struct Fixture {
        scene: SimpleScene,
        panel: Entity,
        sign: Entity,
        door: Entity,
    }

    fn fixture() -> Fixture {
        let mut scene = SimpleScene::new();
        let panel = scene.spawn(Vec3::zeros());
        let sign = scene.spawn(Vec3::new(5.0, 0.0, 0.0));
        let door = scene.spawn(Vec3::new(-5.0, 0.0, 0.0));
        scene.set_name(sign, "Sign");
        scene.set_render_objects(sign, vec![11, INVALID_RENDER_OBJECT, 12]);
        scene.set_name(door, "Door");
        scene.set_render_objects(door, vec![21]);
        Fixture { scene, panel, sign, door }
    }

    #[test]
    fn test_watch_resolves_and_skips_unknown_names() {
        let f = fixture();
        let mut table = LinkTable::new();

        assert!(table.watch(f.panel, "LCD [RLC sign/ScreenArea ghost/X DOOR/Screen]", &f.scene));
        assert_eq!(
            table.targets(f.panel),
            &[
                LinkTarget { entity: f.sign, surface: "ScreenArea".to_string() },
                LinkTarget { entity: f.door, surface: "Screen".to_string() },
            ]
        );
        assert!(!table.watch(f.panel, "LCD [RLC door/Screen]", &f.scene));
        assert_eq!(table.targets(f.panel).len(), 1);
    }

    #[test]
    fn test_label_without_tag_keeps_links() {
        let f = fixture();
        let mut table = LinkTable::new();
        table.watch(f.panel, "[RLC Sign/ScreenArea]", &f.scene);

        table.on_label_changed(f.panel, "Sign (tag removed)", &f.scene);
        assert!(table.is_watched(f.panel));
        assert_eq!(
            table.targets(f.panel),
            &[LinkTarget { entity: f.sign, surface: "ScreenArea".to_string() }]
        );

        table.on_label_changed(f.panel, "Sign [RLC broken", &f.scene);
        assert_eq!(table.targets(f.panel).len(), 1);
    }

    #[test]
    fn test_empty_tag_clears_links() {
        let f = fixture();
        let mut table = LinkTable::new();
        table.watch(f.panel, "[RLC Sign/ScreenArea]", &f.scene);

        table.on_label_changed(f.panel, "Sign [RLC none]", &f.scene);
        assert!(table.targets(f.panel).is_empty());
    }

    #[test]
    fn test_watching_untagged_panel_has_no_links() {
        let f = fixture();
        let mut table = LinkTable::new();

        assert!(table.watch(f.panel, "Just an LCD", &f.scene));
        assert!(table.is_watched(f.panel));
        assert!(table.targets(f.panel).is_empty());
    }

    #[test]
    fn test_unwatch_forgets_panel() {
        let f = fixture();
        let mut table = LinkTable::new();
        table.watch(f.panel, "[RLC Sign/ScreenArea]", &f.scene);

        assert!(table.unwatch(f.panel));
        assert!(!table.unwatch(f.panel));
        assert!(table.is_empty());
        assert!(table.targets(f.panel).is_empty());
    }

    #[test]
    fn test_mirror_skips_invalid_render_objects() {
        let f = fixture();
        let mut table = LinkTable::new();
        let mut renderer = RecordingRenderer::new();
        table.watch(f.panel, "[RLC Sign/ScreenArea]", &f.scene);
        let content = TextContent {
            text: "Docking bay 3".to_string(),
            ..TextContent::default()
        };

        let written = table.mirror(f.panel, &content, 256, 2, &f.scene, &mut renderer);

        assert_eq!(written, 2);
        assert_eq!(
            renderer.created_textures(),
            vec!["LCDRemoteTexture_11_ScreenArea", "LCDRemoteTexture_12_ScreenArea"]
        );
        assert!(renderer.commands().iter().all(|command| match command {
            RenderCommand::CreateTexture { width, height, .. } => (*width, *height) == (512, 256),
            RenderCommand::DrawAlignedText { text, .. } => text == "Docking bay 3",
            RenderCommand::CompositeToSurface { material, .. } => material == "ScreenArea",
        }));
    }

    #[test]
    fn test_mirror_of_unwatched_panel_is_noop() {
        let f = fixture();
        let table = LinkTable::new();
        let mut renderer = RecordingRenderer::new();

        let content = TextContent::default();
        assert_eq!(table.mirror(f.panel, &content, 64, 1, &f.scene, &mut renderer), 0);
        assert!(renderer.commands().is_empty());
    }
}
