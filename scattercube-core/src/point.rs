//! Record and point types

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 2D point with floating point coordinates
pub type Point2f = Point2<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Discrete class label of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(pub usize);

impl Category {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Category {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// One input row: a feature vector and its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub features: Vec<f64>,
    pub category: Category,
}

impl Record {
    pub fn new(features: Vec<f64>, category: impl Into<Category>) -> Self {
        Self {
            features,
            category: category.into(),
        }
    }

    /// Number of feature dimensions
    pub fn dimensions(&self) -> usize {
        self.features.len()
    }
}

/// A record rescaled into the plot cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub position: Point3f,
    pub category: Category,
}

impl NormalizedPoint {
    pub fn new(position: Point3f, category: Category) -> Self {
        Self { position, category }
    }
}

/// Index of a point primitive inside a scene, assigned in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl PointId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A ray in world space, used by pick queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_record_dimensions() {
        let record = Record::new(vec![5.0, 1.0, 0.2], 0);
        assert_eq!(record.dimensions(), 3);
        assert_eq!(record.category, Category(0));
    }

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -4.0));
        assert_relative_eq!(ray.direction.norm(), 1.0);
        assert_relative_eq!(ray.at(2.0).z, -2.0);
    }
}
