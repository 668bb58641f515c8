//! Multi-screen hosts
//!
//! # Architecture
//!
//! - [`ScreenLayout`]: immutable per-host-type screen descriptors, shared through
//!   [`LayoutLibrary`]
//! - [`ScreenState`]: per-screen content plus a dirty flag
//! - [`MultiScreenHost`]: owns the states of one entity, tracks dirtiness and drains one
//!   screen at a time
//! - [`ScreenView`]: change-detecting accessor for a single screen

mod error;
mod host;
mod layout;
mod state;
mod view;

pub use error::{LayoutError, ScreenError};
pub use host::MultiScreenHost;
pub use layout::{LayoutDefinition, LayoutLibrary, ScreenLayout, ScreenLayoutEntry};
pub use state::ScreenState;
pub use view::ScreenView;
pub(crate) use view::Registration;
