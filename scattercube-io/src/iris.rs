//! Bundled Iris flower dataset
//!
//! 150 samples of three species with four measurements each (centimetres):
//! sepal length, sepal width, petal length, petal width.

use crate::delimited::DatasetReader;
use scattercube_core::{Dataset, Result};

const IRIS_CSV: &str = include_str!("../data/iris.csv");

/// Species names in category order
pub const SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Feature columns plotted by default: sepal length, petal length, petal width
pub const DEFAULT_FEATURES: [usize; 3] = [0, 2, 3];

/// Load all four Iris features
pub fn load_iris() -> Result<Dataset> {
    DatasetReader::new()
        .with_header(true)
        .with_category_names(SPECIES)
        .read_str(IRIS_CSV)
}

/// Load the three Iris features used for the 3D plot
pub fn load_iris_3d() -> Result<Dataset> {
    load_iris()?.select_features(&DEFAULT_FEATURES)
}
