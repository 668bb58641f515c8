//! Screen layout definitions
//!
//! A layout is loaded once per host type and shared by every host of that
//! type. Screens are addressed by position on hot paths; the case-insensitive
//! id map is only consulted when resolving a screen by name.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::LayoutError;
use crate::config::{Config, ConfigFormat};

/// Static description of one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayoutEntry {
    /// Screen id, unique within the layout ignoring case
    pub id: String,
    /// Material on the host's model the screen is composited onto
    #[serde(alias = "material")]
    pub material_name: String,
    /// Texture height in pixels
    #[serde(alias = "height")]
    pub texture_resolution: u32,
    /// Texture width as a multiple of the height
    #[serde(alias = "aspect")]
    pub aspect_ratio: u32,
}

impl ScreenLayoutEntry {
    /// Create a layout entry
    pub fn new(
        id: impl Into<String>,
        material_name: impl Into<String>,
        texture_resolution: u32,
        aspect_ratio: u32,
    ) -> Self {
        Self {
            id: id.into(),
            material_name: material_name.into(),
            texture_resolution,
            aspect_ratio,
        }
    }

    /// Texture size as `(width, height)`, `None` if the width overflows
    #[must_use]
    pub const fn checked_texture_size(&self) -> Option<(u32, u32)> {
        match self.texture_resolution.checked_mul(self.aspect_ratio) {
            Some(width) => Some((width, self.texture_resolution)),
            None => None,
        }
    }

    /// Texture size as `(width, height)`
    ///
    /// Validated layouts never saturate.
    #[must_use]
    pub const fn texture_size(&self) -> (u32, u32) {
        (self.texture_resolution.saturating_mul(self.aspect_ratio), self.texture_resolution)
    }

    /// Pixels rasterized for one render surface
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        let (width, height) = self.texture_size();
        u64::from(width) * u64::from(height)
    }
}

/// Serialized form of a layout, as authored in definition files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Host type this layout belongs to
    pub name: String,
    /// Screens in index order
    #[serde(default, alias = "screen")]
    pub screens: Vec<ScreenLayoutEntry>,
}

impl Config for LayoutDefinition {}

fn normalize_id(id: &str) -> String {
    id.to_lowercase()
}

/// Validated, immutable screen layout
#[derive(Debug)]
pub struct ScreenLayout {
    name: String,
    entries: Vec<ScreenLayoutEntry>,
    index_by_id: HashMap<String, usize>,
}

impl ScreenLayout {
    /// Validate a definition
    ///
    /// Fails on an empty screen list, a duplicate id (ignoring case), or a
    /// texture dimension that is zero or too large to address. Duplicates
    /// are never silently overwritten.
    pub fn from_definition(definition: LayoutDefinition) -> Result<Self, LayoutError> {
        let LayoutDefinition { name, screens } = definition;
        if screens.is_empty() {
            return Err(LayoutError::Empty { name });
        }

        let mut index_by_id = HashMap::with_capacity(screens.len());
        for (index, entry) in screens.iter().enumerate() {
            let dimensions_valid = entry.texture_resolution > 0
                && entry.aspect_ratio > 0
                && entry.checked_texture_size().is_some();
            if !dimensions_valid {
                return Err(LayoutError::InvalidDimensions {
                    name,
                    id: entry.id.clone(),
                });
            }
            if index_by_id.insert(normalize_id(&entry.id), index).is_some() {
                return Err(LayoutError::DuplicateId {
                    name,
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self {
            name,
            entries: screens,
            index_by_id,
        })
    }

    /// Build a layout directly from entries
    pub fn new(
        name: impl Into<String>,
        entries: Vec<ScreenLayoutEntry>,
    ) -> Result<Self, LayoutError> {
        Self::from_definition(LayoutDefinition {
            name: name.into(),
            screens: entries,
        })
    }

    /// Host type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Screens in index order
    #[must_use]
    pub fn entries(&self) -> &[ScreenLayoutEntry] {
        &self.entries
    }

    /// Screen at `index`
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ScreenLayoutEntry> {
        self.entries.get(index)
    }

    /// Texture `(width, height)` of the screen at `index`
    #[must_use]
    pub fn texture_size(&self, index: usize) -> Option<(u32, u32)> {
        self.entry(index).map(ScreenLayoutEntry::texture_size)
    }

    /// Number of screens
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated layout
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a screen id, ignoring case
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(&normalize_id(id)).copied()
    }

    /// Serialized form of this layout
    #[must_use]
    pub fn to_definition(&self) -> LayoutDefinition {
        LayoutDefinition {
            name: self.name.clone(),
            screens: self.entries.clone(),
        }
    }
}

/// Loaded layouts, keyed by host type name
#[derive(Debug, Default)]
pub struct LayoutLibrary {
    layouts: HashMap<String, Arc<ScreenLayout>>,
}

impl LayoutLibrary {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a definition, replacing any layout of the same name
    pub fn register(
        &mut self,
        definition: LayoutDefinition,
    ) -> Result<Arc<ScreenLayout>, LayoutError> {
        let layout = Arc::new(ScreenLayout::from_definition(definition)?);
        log::info!("Loaded screen layout '{}' with {} screens", layout.name(), layout.len());
        if self
            .layouts
            .insert(layout.name().to_string(), Arc::clone(&layout))
            .is_some()
        {
            log::warn!("Screen layout '{}' replaced an earlier definition", layout.name());
        }
        Ok(layout)
    }

    /// Parse and register a definition document
    pub fn load_str(
        &mut self,
        contents: &str,
        format: ConfigFormat,
    ) -> Result<Arc<ScreenLayout>, LayoutError> {
        let definition = LayoutDefinition::load_from_str(contents, format)?;
        self.register(definition)
    }

    /// Load and register a `.ron` or `.toml` definition file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<ScreenLayout>, LayoutError> {
        let definition = LayoutDefinition::load_from_file(path)?;
        self.register(definition)
    }

    /// Shared layout for a host type
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ScreenLayout>> {
        self.layouts.get(name).cloned()
    }

    /// Number of loaded layouts
    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// No layouts loaded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONSOLE_RON: &str = r#"(
        name: "console",
        screens: [
            (id: "Main", material_name: "ScreenArea", texture_resolution: 512, aspect_ratio: 2),
            (id: "Status", material: "ScreenArea2", height: 128, aspect: 1),
        ],
    )"#;

    const CONSOLE_TOML: &str = r#"
        name = "console"

        [[screens]]
        id = "Main"
        material_name = "ScreenArea"
        texture_resolution = 512
        aspect_ratio = 2
    "#;

    fn entry(id: &str) -> ScreenLayoutEntry {
        ScreenLayoutEntry::new(id, "ScreenArea", 64, 1)
    }

    #[test]
    fn test_index_lookup_ignores_case() {
        let layout = ScreenLayout::new("panel", vec![entry("A"), entry("Status")]).expect("valid");

        assert_eq!(layout.index_of("a"), Some(0));
        assert_eq!(layout.index_of("STATUS"), Some(1));
        assert_eq!(layout.index_of("missing"), None);
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let result = ScreenLayout::new("panel", vec![entry("Main"), entry("MAIN")]);
        assert!(matches!(result, Err(LayoutError::DuplicateId { ref id, .. }) if id == "MAIN"));
    }

    #[test]
    fn test_empty_layout_is_rejected() {
        let result = ScreenLayout::new("panel", Vec::new());
        assert!(matches!(result, Err(LayoutError::Empty { .. })));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let result = ScreenLayout::new("panel", vec![ScreenLayoutEntry::new("A", "M", 128, 0)]);
        assert!(matches!(result, Err(LayoutError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let mut library = LayoutLibrary::new();
        let oversized = r#"(
            name: "big",
            screens: [
                (id: "A", material_name: "M", texture_resolution: 70000, aspect_ratio: 70000),
            ],
        )"#;
        let result = library.load_str(oversized, ConfigFormat::Ron);

        assert!(matches!(result, Err(LayoutError::InvalidDimensions { ref id, .. }) if id == "A"));
        assert!(library.get("big").is_none());

        // Largest width that still fits
        let edge = ScreenLayoutEntry::new("Edge", "M", 65_536, 65_535);
        assert!(ScreenLayout::new("edge", vec![edge.clone()]).is_ok());
        assert_eq!(edge.pixel_count(), 65_536 * 65_535 * 65_536);
    }

    #[test]
    fn test_texture_size_uses_aspect_for_width() {
        let wide = ScreenLayoutEntry::new("A", "M", 128, 2);
        assert_eq!(wide.texture_size(), (256, 128));
        assert_eq!(wide.pixel_count(), 32_768);

        let layout = ScreenLayout::new("panel", vec![wide]).expect("valid layout");
        assert_eq!(layout.texture_size(0), Some((256, 128)));
        assert_eq!(layout.texture_size(1), None);
    }

    #[test]
    fn test_library_loads_ron_with_aliases() {
        let mut library = LayoutLibrary::new();
        let layout = library.load_str(CONSOLE_RON, ConfigFormat::Ron).expect("valid ron");

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.entry(1).map(|e| e.material_name.as_str()), Some("ScreenArea2"));
        assert_eq!(layout.entry(1).map(ScreenLayoutEntry::texture_size), Some((128, 128)));
        assert!(Arc::ptr_eq(&layout, &library.get("console").expect("registered")));
    }

    #[test]
    fn test_library_loads_toml() {
        let mut library = LayoutLibrary::new();
        let layout = library.load_str(CONSOLE_TOML, ConfigFormat::Toml).expect("valid toml");

        assert_eq!(layout.name(), "console");
        assert_eq!(layout.entries(), &[ScreenLayoutEntry::new("Main", "ScreenArea", 512, 2)]);
    }

    #[test]
    fn test_definition_round_trip_keeps_order() {
        let layout = ScreenLayout::new("panel", vec![entry("B"), entry("A")]).expect("valid");
        let definition = layout.to_definition();
        assert_eq!(definition.screens[0].id, "B");
        assert_eq!(definition.screens[1].id, "A");
    }
}
