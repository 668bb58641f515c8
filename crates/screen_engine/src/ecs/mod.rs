//! Entity identifiers shared with the simulation framework

pub mod entity;

pub use entity::Entity;
