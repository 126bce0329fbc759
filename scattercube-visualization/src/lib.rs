//! Interactive 3D scatter plots
//! 
//! This crate turns normalized datasets into host-renderer geometry and
//! handles point selection:
//! - Scene building (bounding cube, axes, one sphere per record)
//! - Selection store with a single highlighted point
//! - Pick dispatch from mouse and proxy-device input
//! - An in-memory host for headless use

pub mod config;
pub mod scene;
pub mod selection;
pub mod picker;
pub mod camera;
pub mod headless;

pub use config::*;
pub use scene::*;
pub use selection::*;
pub use picker::*;
pub use camera::*;
pub use headless::*;

use scattercube_core::{CategoryColorMap, Dataset, Result, SceneHost};

/// Build a scatter plot of a 3-feature dataset with the default palette,
/// and a selector with proxy input attached
pub fn scatter_dataset<H: SceneHost + ?Sized>(
    host: &mut H,
    dataset: &Dataset,
    config: SceneConfig,
) -> Result<(Scene, PointSelector)> {
    let colors = CategoryColorMap::with_default_palette(dataset.category_names().len())?;
    let mut selector = PointSelector::new(&config);
    let scene = SceneBuilder::new(colors)
        .with_config(config)
        .build_from_dataset(host, dataset)?;
    selector.show(host);
    Ok((scene, selector))
}
