//! Dataset I/O for scattercube
//! 
//! This crate reads labeled numeric tables from delimited text and ships
//! the Iris dataset used by the reference scatter plot.

pub mod delimited;
pub mod iris;
pub mod error;

pub use delimited::{Delimiter, DatasetReader, LabelColumn};
pub use iris::{load_iris, load_iris_3d};
pub use error::*;

use scattercube_core::{Dataset, Result};

/// Read a dataset file with auto-detected delimiter and header
pub fn read_dataset<P: AsRef<std::path::Path>>(path: P) -> Result<Dataset> {
    DatasetReader::new().read_path(path)
}
