//! Screen and layout errors
//!
//! These indicate caller misuse or bad definition data; none are transient.

use crate::config::ConfigError;
use crate::ecs::Entity;

/// Problems found while loading a screen layout
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// The definition contains no screens
    #[error("Layout '{name}' defines no screens")]
    Empty {
        /// Layout name
        name: String,
    },

    /// Two screens share an id (ids compare case-insensitively)
    #[error("Layout '{name}' defines screen '{id}' more than once")]
    DuplicateId {
        /// Layout name
        name: String,
        /// Offending id as written in the second occurrence
        id: String,
    },

    /// A screen has a zero or overflowing resolution or aspect ratio
    #[error("Layout '{name}' screen '{id}' has an invalid texture dimension")]
    InvalidDimensions {
        /// Layout name
        name: String,
        /// Offending screen id
        id: String,
    },

    /// The definition file could not be read or parsed
    #[error("Failed to load layout definition: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the screen accessor surface
#[derive(thiserror::Error, Debug)]
pub enum ScreenError {
    /// The entity has no multi-screen host
    #[error("{entity} does not have multiple screens")]
    MissingCapability {
        /// Entity that was addressed
        entity: Entity,
    },

    /// No screen with this id exists in the host's layout
    #[error("Screen '{id}' doesn't exist")]
    UnknownScreenId {
        /// Requested id
        id: String,
    },

    /// The layout definition is invalid
    #[error("Malformed layout: {0}")]
    MalformedLayout(#[from] LayoutError),
}
