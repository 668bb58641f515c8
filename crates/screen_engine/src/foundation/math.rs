//! Math utilities and types
//!
//! Provides the vector types used for positions and directions in the scene.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Squared distance between two points
///
/// Prefer this over [`distance`] for threshold checks; it avoids the square root.
#[must_use]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm_squared()
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_and_squared_distance_agree() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);

        assert_relative_eq!(distance(&a, &b), 5.0);
        assert_relative_eq!(distance_squared(&a, &b), 25.0);
    }
}
