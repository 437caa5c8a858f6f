//! PNG encoding and decoding of RGBA pixel buffers.

use image::RgbaImage;
use std::io::{self, BufRead, Error, ErrorKind, Seek, Write};

/// Reads an image from a PNG file, widening it to 8-bit RGBA.  Images
/// without an alpha channel (or with a palette transparency key) come out
/// with alpha filled in by the decoder, so opaque pixels have alpha 255.
pub fn read_png<R: BufRead + Seek>(input: R) -> io::Result<RgbaImage> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::STRIP_16 |
                                png::Transformations::EXPAND);
    let info = decoder.read_header_info()?;
    let (width, height) = (info.width, info.height);
    let mut reader = decoder.read_info()?;

    let (color_type, bit_depth) = reader.output_color_type();
    assert!(bit_depth == png::BitDepth::Eight);
    let buffer_size = reader.output_buffer_size().ok_or_else(|| {
        Error::new(ErrorKind::InvalidData, "PNG image is too large")
    })?;
    let mut data = vec![0u8; buffer_size];
    reader.next_frame(&mut data)?;
    reader.finish()?;

    let rgba = match color_type {
        png::ColorType::Rgba => data,
        png::ColorType::Rgb => rgb_to_rgba(&data),
        png::ColorType::GrayscaleAlpha => gray_alpha_to_rgba(&data),
        png::ColorType::Grayscale => grayscale_to_rgba(&data),
        _ => unreachable!(), // EXPAND prevents paletted output
    };
    RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        Error::new(ErrorKind::InvalidData,
                   "PNG pixel data does not match its dimensions")
    })
}

/// Writes the image to a PNG file as 8-bit RGBA.
pub fn write_png<W: Write>(image: &RgbaImage, output: W) -> io::Result<()> {
    let mut encoder = png::Encoder::new(output, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Encodes the image as an in-memory PNG stream.
pub fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    write_png(image, &mut data)?;
    Ok(data)
}

/// Converts RGB image data into RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    assert_eq!(rgb.len() % 3, 0);
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Converts grayscale-with-alpha image data into RGBA.
fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    assert_eq!(gray_alpha.len() % 2, 0);
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba
}

/// Converts grayscale image data into RGBA.
fn grayscale_to_rgba(gray: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba
}
