//! Core data structures and traits for scattercube
//! 
//! This crate provides the data model shared by every scattercube crate:
//! records and datasets, normalized points, category colors, legends,
//! and the capability traits a host renderer implements.

pub mod point;
pub mod dataset;
pub mod color;
pub mod legend;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use dataset::*;
pub use color::*;
pub use legend::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4};
