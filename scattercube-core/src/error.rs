//! Error types for scattercube

use thiserror::Error;

use crate::point::Category;

/// Main error type for scattercube operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Dimension mismatch at record {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Record {index} has category {category} with no color assigned")]
    UnmappedCategory { index: usize, category: Category },
    
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parse error: {0}")]
    Parse(String),
    
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for scattercube operations
pub type Result<T> = std::result::Result<T, Error>;
