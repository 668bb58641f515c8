//! Scene access
//!
//! The simulation framework owns entities, their positions and their render
//! objects. The engine only sees it through the [`Scene`] trait, so any world
//! representation can drive the screen scheduler. [`SimpleScene`] is a small
//! in-memory implementation for tools, demos and tests.

mod access;
mod simple_scene;

pub use access::{LegacySurfaceStatus, RenderObjectId, Scene, Viewpoint, INVALID_RENDER_OBJECT};
pub use simple_scene::SimpleScene;
