//! # scattercube algorithms
//!
//! Feature normalization for mapping datasets into the plot cube, and the
//! ray intersection tests used to resolve pick queries.

pub mod normalize;
pub mod intersection;

// Re-export commonly used items
pub use normalize::*;
pub use intersection::*;
