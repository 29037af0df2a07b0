// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse Word document: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Manifest has no '{0}' column")]
    MissingColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file name for candidate: {0}")]
    InvalidName(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document reading failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Manifest reconciliation failed: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
