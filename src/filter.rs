//! Background transparency filter.
//!
//! Every pixel whose red, green and blue channels are all strictly above
//! [`BRIGHTNESS_THRESHOLD`] is replaced with fully transparent white.  All
//! other pixels, including their alpha, are left untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::load::load_rgba;
use crate::pngio;

/// Channel value that red, green and blue must all exceed for a pixel to
/// count as background.
pub const BRIGHTNESS_THRESHOLD: u8 = 240;

/// The value written over background pixels.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Returns true if the pixel is near-white and should become transparent.
/// Alpha is not consulted.
///
/// # Examples
/// ```
/// use icoprep::filter::is_near_white;
/// use image::Rgba;
/// assert!(is_near_white(&Rgba([241, 241, 241, 255])));
/// assert!(!is_near_white(&Rgba([240, 255, 255, 255])));
/// ```
#[inline]
pub fn is_near_white(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, _] = pixel.0;
    r > BRIGHTNESS_THRESHOLD && g > BRIGHTNESS_THRESHOLD &&
    b > BRIGHTNESS_THRESHOLD
}

/// Rewrites every near-white pixel of the image in place, returning the
/// number of pixels that were rewritten.  Dimensions never change.
pub fn clear_near_white(image: &mut RgbaImage) -> usize {
    let mut cleared = 0;
    for pixel in image.pixels_mut() {
        if is_near_white(pixel) {
            *pixel = TRANSPARENT_WHITE;
            cleared += 1;
        }
    }
    cleared
}

/// Load the image at `input`, clear its near-white background and save the
/// result to `output` as PNG (whatever the output extension).  Returns the
/// dimensions of the saved image.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the input cannot be read or decoded, and
/// [`Error::ImageSave`] if the output cannot be written.
pub fn remove_background<P, Q>(input: P, output: Q) -> Result<(u32, u32)>
    where P: AsRef<Path>,
          Q: AsRef<Path>
{
    let (input, output) = (input.as_ref(), output.as_ref());
    tracing::info!("Removing background from {}", input.display());

    let mut image = load_rgba(input)?;
    let cleared = clear_near_white(&mut image);
    tracing::debug!("Cleared {cleared} of {} pixels",
                    image.width() as u64 * image.height() as u64);

    tracing::info!("Saving output to {}", output.display());
    save_png(&image, output)?;
    Ok(image.dimensions())
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let save_error = |source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(save_error)?);
    pngio::write_png(image, &mut writer).map_err(save_error)?;
    writer.flush().map_err(save_error)?;
    Ok(())
}
