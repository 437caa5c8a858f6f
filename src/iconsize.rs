use std::fmt;

/// The square icon sizes embedded in a generated ICO file.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum IconSize {
    /// 16x16 pixels.
    Size16x16,
    /// 32x32 pixels.
    Size32x32,
    /// 48x48 pixels.
    Size48x48,
    /// 64x64 pixels.
    Size64x64,
    /// 128x128 pixels.
    Size128x128,
    /// 256x256 pixels, the largest size an ICO directory can describe.
    Size256x256,
}

impl IconSize {
    /// Every supported size, smallest first.  This is also the order in
    /// which generated icon files list their entries.
    pub const ALL: [IconSize; 6] = [IconSize::Size16x16,
                                    IconSize::Size32x32,
                                    IconSize::Size48x48,
                                    IconSize::Size64x64,
                                    IconSize::Size128x128,
                                    IconSize::Size256x256];

    /// Get the icon size with the given pixel dimensions, if any.
    ///
    /// # Examples
    /// ```
    /// use icoprep::IconSize;
    /// assert_eq!(IconSize::from_pixel_size(48, 48),
    ///            Some(IconSize::Size48x48));
    /// assert_eq!(IconSize::from_pixel_size(48, 32), None);
    /// assert_eq!(IconSize::from_pixel_size(512, 512), None);
    /// ```
    pub fn from_pixel_size(width: u32, height: u32) -> Option<IconSize> {
        if width != height {
            return None;
        }
        IconSize::ALL.iter().cloned().find(|size| size.pixel_width() == width)
    }

    /// Returns the width of this icon size, in pixels.
    pub fn pixel_width(self) -> u32 {
        match self {
            IconSize::Size16x16 => 16,
            IconSize::Size32x32 => 32,
            IconSize::Size48x48 => 48,
            IconSize::Size64x64 => 64,
            IconSize::Size128x128 => 128,
            IconSize::Size256x256 => 256,
        }
    }

    /// Returns the height of this icon size, in pixels.  Always equal to
    /// the width.
    pub fn pixel_height(self) -> u32 {
        self.pixel_width()
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "{}x{}", self.pixel_width(), self.pixel_height())
    }
}

/// Converts a pixel dimension into the single byte used by an ICO
/// directory entry, where 256 is stored as zero.  Returns `None` for
/// dimensions the format cannot describe.
pub fn dimension_to_byte(pixels: u32) -> Option<u8> {
    match pixels {
        1..=255 => Some(pixels as u8),
        256 => Some(0),
        _ => None,
    }
}

/// Inverse of [`dimension_to_byte`](fn.dimension_to_byte.html).
pub fn byte_to_dimension(byte: u8) -> u32 {
    if byte == 0 { 256 } else { u32::from(byte) }
}

/// Method of encoding an image within an icon entry's payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    /// Payload is a complete PNG file.
    Png,
    /// Payload is a headerless BMP (a DIB header, XOR bitmap and AND mask).
    Dib,
}

/// The first eight bytes of any PNG stream.
pub(crate) const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

impl Encoding {
    /// Determines the encoding of an entry payload by sniffing its first
    /// bytes.
    pub fn detect(payload: &[u8]) -> Encoding {
        if payload.starts_with(PNG_SIGNATURE) {
            Encoding::Png
        } else {
            Encoding::Dib
        }
    }
}
