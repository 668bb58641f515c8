//! # Screen Engine
//!
//! Drives text-bearing display surfaces ("screens") attached to objects in a
//! live 3D scene. Each screen's content is rasterized on demand into a texture
//! and composited onto a material of the owning object.
//!
//! ## Features
//!
//! - **Multi-Screen Hosts**: Entities carrying a fixed set of independently
//!   updatable screens described by a shared [`screens::ScreenLayout`]
//! - **Dirty Tracking**: Change-detecting setters and round-robin draining
//! - **Budget Scheduling**: One host per tick, plus nearest-first updates
//!   whenever the renderer reports freed resources
//! - **Legacy Surfaces**: Single-screen panels compete for the same budget
//! - **Remote Links**: Mirror a panel's content onto named target blocks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use screen_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut library = LayoutLibrary::new();
//!     let layout = library.load_file("resources/console.ron")?;
//!
//!     let mut scene = SimpleScene::new();
//!     scene.set_viewpoint(Some(Viewpoint::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0))));
//!     let console = scene.spawn(Vec3::new(0.0, 0.0, -10.0));
//!     scene.set_render_objects(console, vec![1]);
//!
//!     let mut scheduler = ScreenUpdateScheduler::new(
//!         SchedulerConfig::default(),
//!         scene,
//!         RecordingRenderer::new(),
//!     );
//!     scheduler.attach();
//!     scheduler.attach_host(console, layout);
//!     scheduler.screen(console, "main")?.set_text("Hello");
//!
//!     // Once per simulation step
//!     scheduler.update();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod links;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod screens;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SchedulerConfig},
        ecs::Entity,
        foundation::{
            color::Color,
            math::{Vec2, Vec3},
        },
        links::{parse_link_tag, LinkResolver, LinkSpec, LinkTable, LinkTarget},
        render::{
            FontId, RecordingRenderer, RenderCommand, ScreenRenderer, TextAlignment, TextContent,
        },
        scene::{LegacySurfaceStatus, RenderObjectId, Scene, SimpleScene, Viewpoint},
        scheduler::{ScreenUpdateScheduler, UpdateCandidate},
        screens::{
            LayoutDefinition, LayoutError, LayoutLibrary, MultiScreenHost, ScreenError,
            ScreenLayout, ScreenLayoutEntry, ScreenState, ScreenView,
        },
    };
}
