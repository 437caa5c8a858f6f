use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::io::{self, Cursor, Error, ErrorKind, Read, Write};

use super::iconsize::{byte_to_dimension, dimension_to_byte, Encoding,
                      IconSize};
use super::pngio;

/// The length of an icon directory entry, in bytes:
pub(crate) const ICON_DIR_ENTRY_LENGTH: u32 = 16;

/// The length of a BITMAPINFOHEADER, the only DIB header we decode:
const BITMAP_INFO_HEADER_LENGTH: u32 = 40;

/// One image stored in an ICO file: the metadata from its directory entry,
/// plus the encoded payload (a PNG stream or a DIB bitmap).
pub struct IconEntry {
    width: u32,
    height: u32,
    color_count: u8,
    planes: u16,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconEntry {
    /// Creates an icon entry with the given metadata and payload.
    pub fn new(width: u32,
               height: u32,
               bits_per_pixel: u16,
               data: Vec<u8>)
               -> IconEntry {
        IconEntry {
            width,
            height,
            color_count: 0,
            planes: 1,
            bits_per_pixel,
            data,
        }
    }

    /// Encodes the image as a 32-bit PNG entry of the given size.  The
    /// image is resampled (Lanczos3) first if its dimensions differ from
    /// the size.
    pub fn encode_image_with_size(image: &RgbaImage,
                                  size: IconSize)
                                  -> io::Result<IconEntry> {
        let (width, height) = (size.pixel_width(), size.pixel_height());
        let data = if image.dimensions() == (width, height) {
            pngio::encode_png(image)?
        } else {
            let resized =
                imageops::resize(image, width, height, FilterType::Lanczos3);
            pngio::encode_png(&resized)?
        };
        Ok(IconEntry::new(width, height, 32, data))
    }

    /// Decodes the entry into an RGBA image.  Returns an error if the
    /// payload is malformed, uses a DIB layout other than uncompressed 32
    /// bits per pixel, or disagrees with the directory dimensions.
    pub fn decode_image(&self) -> io::Result<RgbaImage> {
        let image = match self.encoding() {
            Encoding::Png => pngio::read_png(Cursor::new(&self.data))?,
            Encoding::Dib => decode_dib(&self.data)?,
        };
        if image.width() != self.width || image.height() != self.height {
            let msg = format!("decoded image has wrong dimensions \
                               ({}x{} instead of {}x{})",
                              image.width(),
                              image.height(),
                              self.width,
                              self.height);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(image)
    }

    /// Returns the icon size of this entry, or `None` if its dimensions are
    /// not one of the supported square sizes.
    pub fn icon_size(&self) -> Option<IconSize> {
        IconSize::from_pixel_size(self.width, self.height)
    }

    /// Returns how the payload of this entry is encoded.
    pub fn encoding(&self) -> Encoding {
        Encoding::detect(&self.data)
    }

    /// Returns the width of the entry, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the entry, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bit depth recorded in the directory entry.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the encoded payload for this entry.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length of the encoded payload, in bytes.
    pub fn data_length(&self) -> u32 {
        self.data.len() as u32
    }

    /// Reads a directory entry, returning the entry metadata together with
    /// the payload's length and offset.  The payload itself is filled in
    /// by the caller once the whole directory has been read.
    pub(crate) fn read_dir_entry<R: Read>(mut reader: R)
                                          -> io::Result<(IconEntry, u32, u32)> {
        let width = byte_to_dimension(reader.read_u8()?);
        let height = byte_to_dimension(reader.read_u8()?);
        let color_count = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let data_length = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()?;
        let entry = IconEntry {
            width,
            height,
            color_count,
            planes,
            bits_per_pixel,
            data: Vec::new(),
        };
        Ok((entry, data_length, data_offset))
    }

    pub(crate) fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Writes the directory entry for this icon, pointing at a payload
    /// stored at `data_offset` bytes from the start of the file.
    pub(crate) fn write_dir_entry<W: Write>(&self,
                                            mut writer: W,
                                            data_offset: u32)
                                            -> io::Result<()> {
        writer.write_u8(encode_dimension(self.width)?)?;
        writer.write_u8(encode_dimension(self.height)?)?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(0)?;
        writer.write_u16::<LittleEndian>(self.planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_length())?;
        writer.write_u32::<LittleEndian>(data_offset)?;
        Ok(())
    }
}

fn encode_dimension(pixels: u32) -> io::Result<u8> {
    dimension_to_byte(pixels).ok_or_else(|| {
        let msg = format!("ICO entries cannot be {} pixels wide or tall",
                          pixels);
        Error::new(ErrorKind::InvalidInput, msg)
    })
}

/// Decodes an uncompressed 32-bit DIB payload.  Rows are stored bottom-up
/// in BGRA order; the header height counts both the color bitmap and the
/// AND mask that follows it, which is ignored since the color bitmap
/// already carries alpha.
fn decode_dib(input: &[u8]) -> io::Result<RgbaImage> {
    let mut reader = Cursor::new(input);
    let header_length = reader.read_u32::<LittleEndian>()?;
    if header_length < BITMAP_INFO_HEADER_LENGTH {
        return Err(dib_error("invalid DIB header length"));
    }
    let width = reader.read_i32::<LittleEndian>()?;
    let doubled_height = reader.read_i32::<LittleEndian>()?;
    let _planes = reader.read_u16::<LittleEndian>()?;
    let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
    let compression = reader.read_u32::<LittleEndian>()?;
    if bits_per_pixel != 32 || compression != 0 {
        let msg = format!("unsupported DIB layout ({} bits per pixel, \
                           compression {})",
                          bits_per_pixel,
                          compression);
        return Err(dib_error(&msg));
    }
    if width <= 0 || doubled_height <= 0 || doubled_height % 2 != 0 {
        return Err(dib_error("invalid DIB dimensions"));
    }
    let (width, height) = (width as u32, (doubled_height / 2) as u32);
    let pixels_start = header_length as usize;
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(4))
        .and_then(|length| length.checked_add(pixels_start))
        .and_then(|end| input.get(pixels_start..end))
        .ok_or_else(|| dib_error("truncated DIB pixel data"))?;
    let mut image = RgbaImage::new(width, height);
    for (row, bgra_row) in pixels.chunks(width as usize * 4).enumerate() {
        let y = height - 1 - row as u32;
        for (x, bgra) in bgra_row.chunks(4).enumerate() {
            image.put_pixel(x as u32,
                            y,
                            Rgba([bgra[2], bgra[1], bgra[0], bgra[3]]));
        }
    }
    Ok(image)
}

fn dib_error(msg: &str) -> Error {
    Error::new(ErrorKind::InvalidData, msg.to_string())
}
