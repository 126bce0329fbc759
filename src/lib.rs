//! # scattercube
//!
//! Interactive 3D scatter plots of labeled datasets for immersive renderers.
//!
//! This is the umbrella crate that provides convenient access to all scattercube functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Data model (Record, Dataset, CategoryColorMap, ...) and host renderer traits
//! - **Algorithms**: Min-max normalization and ray intersection
//! - **I/O**: Delimited-text datasets and the bundled Iris dataset
//! - **Visualization**: Scene building, point selection and pick dispatch
//!
//! ## Quick Start
//!
//! ```rust
//! use scattercube::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dataset = load_iris_3d()?;
//! let mut host = HeadlessHost::new();
//! let (mut scene, selector) = scatter_dataset(&mut host, &dataset, SceneConfig::default())?;
//!
//! // Click the center of the screen
//! let click = InputEvent::PointerDown {
//!     button: PointerButton::Left,
//!     cursor: Point2f::new(0.0, 0.0),
//! };
//! selector.handle_event(&mut scene, &mut host, &click);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables algorithms, io, and visualization
//! - `algorithms`: Normalization and intersection
//! - `io`: Dataset readers
//! - `visualization`: Scene, selection and picking
//! - `winit`: Conversions from winit mouse buttons
//! - `all`: Enables all features

// Re-export core functionality
pub use scattercube_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use scattercube_algorithms as algorithms;

#[cfg(feature = "io")]
pub use scattercube_io as io;

#[cfg(feature = "visualization")]
pub use scattercube_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use scattercube_core::*;
    
    #[cfg(feature = "algorithms")]
    pub use scattercube_algorithms::*;
    
    #[cfg(feature = "io")]
    pub use scattercube_io::*;
    
    #[cfg(feature = "visualization")]
    pub use scattercube_visualization::*;
}
