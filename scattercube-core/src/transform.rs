//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation applied to scene-graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Translate then scale about the local origin, as a node's local transform
    pub fn from_translation_scale(translation: Vector3<f32>, scale: f32) -> Self {
        Self::translation(translation) * Self::uniform_scaling(scale)
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Uniform scale factor along the X axis
    pub fn scale_factor(&self) -> f32 {
        self.transform_vector(&Vector3::x()).norm()
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    /// Apply `rhs` first, then `self`
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_then_scale() {
        let t = Transform3D::from_translation_scale(Vector3::new(0.0, 1.7, 0.0), 2.0);
        let p = t.transform_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(p, Point3::new(1.0, 2.7, 1.0), epsilon = 1e-6);
        assert_relative_eq!(t.scale_factor(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform3D::from_translation_scale(Vector3::new(1.0, -2.0, 3.0), 0.5);
        let inv = t.inverse().unwrap();
        let p = Point3::new(0.25, 0.1, -0.3);
        assert_relative_eq!(inv.transform_point(&t.transform_point(&p)), p, epsilon = 1e-5);
    }
}
