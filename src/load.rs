//! Image loading shared by both tools.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::error::{Error, Result};

/// Load an image from disk, in whatever format its contents indicate.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] naming the path if the file is missing or
/// cannot be decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let load_error = |source: image::ImageError| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    let img = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| load_error(err.into()))?
        .decode()
        .map_err(load_error)?;
    let (width, height) = img.dimensions();
    tracing::debug!("Loaded {} ({width}x{height}, {:?})",
                    path.display(),
                    img.color());
    Ok(img)
}

/// Load an image from disk and widen it to 8-bit RGBA.  Pixels without an
/// alpha channel become fully opaque.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] naming the path if the file is missing or
/// cannot be decoded.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    Ok(load_image(path)?.to_rgba8())
}
