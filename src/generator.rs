//! Icon generation from a single source image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::icondir::IconDir;
use crate::iconsize::IconSize;
use crate::load::load_rgba;

/// Load the image at `input` and write an ICO file to `output` embedding it
/// at every size in [`IconSize::ALL`].  Non-square sources are stretched
/// to each square size.  Returns the directory that was written.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the input cannot be read or decoded,
/// [`Error::Encode`] if a size fails to encode, and [`Error::ImageSave`]
/// if the output cannot be written.
pub fn generate_icon<P, Q>(input: P, output: Q) -> Result<IconDir>
    where P: AsRef<Path>,
          Q: AsRef<Path>
{
    let (input, output) = (input.as_ref(), output.as_ref());
    tracing::info!("Generating icon from {}", input.display());

    let image = load_rgba(input)?;
    let dir = build_icon_dir(&image)?;

    tracing::info!("Saving output to {}", output.display());
    let save_error = |source| Error::ImageSave {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(save_error)?);
    dir.write(&mut writer).map_err(save_error)?;
    writer.flush().map_err(save_error)?;
    Ok(dir)
}

/// Builds an icon directory holding the image resampled to every supported
/// size, smallest first.
///
/// # Errors
///
/// Returns [`Error::Encode`] naming the first size that failed.
pub fn build_icon_dir(image: &RgbaImage) -> Result<IconDir> {
    let mut dir = IconDir::new();
    for &size in &IconSize::ALL {
        dir.add_icon_with_size(image, size)
            .map_err(|source| Error::Encode { size, source })?;
        if let Some(entry) = dir.entries.last() {
            tracing::debug!("Encoded {size} entry ({} bytes)",
                            entry.data_length());
        }
    }
    Ok(dir)
}
