//! Error types for dataset I/O

use thiserror::Error;

/// Errors that can occur while reading a dataset
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },
    
    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },
    
    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },
    
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for scattercube_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(inner) => scattercube_core::Error::Io(inner),
            IoError::FileNotFound { .. } => scattercube_core::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                e.to_string(),
            )),
            IoError::InvalidFormat { .. } | IoError::ParseError { .. } => {
                scattercube_core::Error::Parse(e.to_string())
            }
        }
    }
}
