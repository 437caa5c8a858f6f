//! Error type for the path-level operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::iconsize::IconSize;

/// Errors raised while generating icons or filtering backgrounds.
#[derive(Error, Debug)]
pub enum Error {
    /// The source image is missing or could not be decoded.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        /// The path that was read.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The output file could not be created or written.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        /// The path that was written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// One of the icon sizes could not be encoded.
    #[error("failed to encode {size} icon: {source}")]
    Encode {
        /// The size being encoded.
        size: IconSize,
        /// The underlying encoder error.
        #[source]
        source: io::Error,
    },
}

/// Result type alias for icoprep operations.
pub type Result<T> = std::result::Result<T, Error>;
