//! Error types for the imgtool crate.

use std::path::PathBuf;

/// Errors that can occur while parsing input or processing images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A hex color string could not be parsed.
    #[error("Invalid HEX color: {0}")]
    InvalidColor(String),

    /// The output file already exists and overwriting is disabled.
    #[error("output already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// The input pattern matched no files.
    #[error("No files found matching: {0}")]
    NoInputFiles(String),

    /// The input glob pattern is malformed.
    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A numeric argument could not be parsed.
    #[error("invalid number for {name}: {value}")]
    InvalidNumber {
        /// Argument name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// The target size is not usable.
    #[error("size must be greater than 0, got: {0}")]
    InvalidSize(u32),

    /// A required argument was not supplied.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// A command line could not be tokenized (e.g. unbalanced quotes).
    #[error("invalid command syntax: {0}")]
    InvalidSyntax(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
