use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use image::RgbaImage;
use std::io::{self, Error, ErrorKind, Read, Write};

use super::entry::{IconEntry, ICON_DIR_ENTRY_LENGTH};
use super::iconsize::IconSize;

/// The resource type stored in the header of an ICO (rather than CUR) file:
const ICO_RESOURCE_TYPE: u16 = 1;

/// The length of an icon directory header, in bytes:
const ICON_DIR_HEADER_LENGTH: u32 = 6;

/// A set of icons stored in a single ICO file.
pub struct IconDir {
    /// The icon entries stored in the ICO file, in directory order.
    pub entries: Vec<IconEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns true if the icon directory contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the image into the directory, choosing the icon size from
    /// the dimensions of the image.  Returns an error if there is no
    /// supported icon size matching the image dimensions.
    pub fn add_icon(&mut self, image: &RgbaImage) -> io::Result<()> {
        if let Some(size) = IconSize::from_pixel_size(image.width(),
                                                      image.height()) {
            self.add_icon_with_size(image, size)
        } else {
            let msg = format!("no supported icon size has dimensions {}x{}",
                              image.width(),
                              image.height());
            Err(Error::new(ErrorKind::InvalidInput, msg))
        }
    }

    /// Encodes the image into the directory at the given icon size,
    /// resampling it if its dimensions differ.  Any existing entry of the
    /// same size is replaced.
    pub fn add_icon_with_size(&mut self,
                              image: &RgbaImage,
                              size: IconSize)
                              -> io::Result<()> {
        let entry = IconEntry::encode_image_with_size(image, size)?;
        self.entries.retain(|existing| existing.icon_size() != Some(size));
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the supported icon sizes present in the directory, in
    /// directory order.  These can be passed to
    /// [`get_icon_with_size`](#method.get_icon_with_size) to decode the
    /// icons.
    pub fn available_icons(&self) -> Vec<IconSize> {
        self.entries.iter().filter_map(IconEntry::icon_size).collect()
    }

    /// Determines whether the directory contains an entry of the given
    /// size.
    pub fn has_icon_with_size(&self, size: IconSize) -> bool {
        self.find_entry(size).is_ok()
    }

    /// Decodes the entry of the given size.  Returns an error if no such
    /// entry is present, or if its payload is malformed.
    pub fn get_icon_with_size(&self, size: IconSize) -> io::Result<RgbaImage> {
        self.find_entry(size)?.decode_image()
    }

    fn find_entry(&self, size: IconSize) -> io::Result<&IconEntry> {
        self.entries
            .iter()
            .find(|entry| entry.icon_size() == Some(size))
            .ok_or_else(|| {
                let msg = format!("the icon directory does not contain a \
                                   {} entry",
                                  size);
                Error::new(ErrorKind::NotFound, msg)
            })
    }

    /// Reads an icon directory from an ICO file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        let resource_type = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 || resource_type != ICO_RESOURCE_TYPE {
            let msg = "not an ico file (wrong header)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let count = reader.read_u16::<LittleEndian>()?;
        let mut located = Vec::with_capacity(count as usize);
        for _ in 0..count {
            located.push(IconEntry::read_dir_entry(reader.by_ref())?);
        }
        // Payload offsets are absolute, so keep the rest of the file around
        // and slice each entry's data out of it.
        let data_start = ICON_DIR_HEADER_LENGTH +
                         ICON_DIR_ENTRY_LENGTH * u32::from(count);
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest)?;
        let mut dir = IconDir::new();
        for (mut entry, data_length, data_offset) in located {
            let start = data_offset.checked_sub(data_start)
                .map(|start| start as usize);
            let end = start.and_then(|start| {
                start.checked_add(data_length as usize)
            });
            let data = match (start, end) {
                (Some(start), Some(end)) if end <= rest.len() => {
                    rest[start..end].to_vec()
                }
                _ => {
                    let msg = format!("icon payload at offset {} (length \
                                       {}) lies outside the file",
                                      data_offset,
                                      data_length);
                    return Err(Error::new(ErrorKind::InvalidData, msg));
                }
            };
            entry.set_data(data);
            dir.entries.push(entry);
        }
        Ok(dir)
    }

    /// Writes the icon directory to an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.len() > u16::MAX as usize {
            let msg = format!("too many icon entries ({})",
                              self.entries.len());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(ICO_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset = self.header_length();
        for entry in &self.entries {
            entry.write_dir_entry(writer.by_ref(), data_offset)?;
            data_offset += entry.data_length();
        }
        for entry in &self.entries {
            writer.write_all(entry.data())?;
        }
        Ok(())
    }

    /// Returns the length of the header plus directory, which is also the
    /// offset of the first payload.
    fn header_length(&self) -> u32 {
        ICON_DIR_HEADER_LENGTH +
        ICON_DIR_ENTRY_LENGTH * (self.entries.len() as u32)
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// header and directory.
    pub fn total_length(&self) -> u32 {
        let mut length = self.header_length();
        for entry in &self.entries {
            length += entry.data_length();
        }
        length
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::entry::IconEntry;
    use std::io::Cursor;

    #[test]
    fn icon_with_size() {
        let mut dir = IconDir::new();
        assert!(!dir.has_icon_with_size(IconSize::Size32x32));
        let image = RgbaImage::new(32, 32);
        dir.add_icon(&image).unwrap();
        assert!(dir.has_icon_with_size(IconSize::Size32x32));
        assert!(dir.get_icon_with_size(IconSize::Size32x32).is_ok());
        assert_eq!(ErrorKind::NotFound,
                   dir.get_icon_with_size(IconSize::Size16x16)
                       .unwrap_err()
                       .kind());
    }

    #[test]
    fn add_icon_rejects_unsupported_dimensions() {
        let mut dir = IconDir::new();
        let err = dir.add_icon(&RgbaImage::new(20, 20)).unwrap_err();
        assert_eq!(ErrorKind::InvalidInput, err.kind());
        assert!(dir.is_empty());
    }

    #[test]
    fn add_icon_with_size_replaces_existing() {
        let mut dir = IconDir::new();
        dir.add_icon_with_size(&RgbaImage::new(5, 5), IconSize::Size16x16)
            .unwrap();
        dir.add_icon_with_size(&RgbaImage::new(7, 3), IconSize::Size16x16)
            .unwrap();
        assert_eq!(1, dir.entries.len());
    }

    #[test]
    fn write_empty_icon_dir() {
        let dir = IconDir::new();
        assert!(dir.is_empty());
        let mut output: Vec<u8> = vec![];
        dir.write(&mut output).expect("write failed");
        assert_eq!(b"\0\0\x01\0\0\0", &output as &[u8]);
        assert_eq!(6, dir.total_length());
    }

    #[test]
    fn write_icon_dir_with_fake_entries() {
        let mut dir = IconDir::new();
        dir.entries.push(IconEntry::new(16, 16, 32, b"foobar".to_vec()));
        dir.entries.push(IconEntry::new(256, 256, 32, b"#".to_vec()));
        let mut output: Vec<u8> = vec![];
        dir.write(&mut output).expect("write failed");
        assert_eq!(&b"\0\0\x01\0\x02\0\
                      \x10\x10\0\0\x01\0\x20\0\x06\0\0\0\x26\0\0\0\
                      \0\0\0\0\x01\0\x20\0\x01\0\0\0\x2c\0\0\0\
                      foobar#"[..],
                   &output as &[u8]);
        assert_eq!(output.len() as u32, dir.total_length());
    }

    #[test]
    fn read_icon_dir_with_fake_entries() {
        let input: Cursor<&[u8]> = Cursor::new(b"\0\0\x01\0\x02\0\
                      \x10\x10\0\0\x01\0\x20\0\x06\0\0\0\x26\0\0\0\
                      \0\0\0\0\x01\0\x20\0\x01\0\0\0\x2c\0\0\0\
                      foobar#");
        let dir = IconDir::read(input).expect("read failed");
        assert_eq!(2, dir.entries.len());
        assert_eq!(16, dir.entries[0].width());
        assert_eq!(b"foobar", dir.entries[0].data());
        assert_eq!(256, dir.entries[1].height());
        assert_eq!(b"#", dir.entries[1].data());
        assert_eq!(dir.available_icons(),
                   vec![IconSize::Size16x16, IconSize::Size256x256]);
    }

    #[test]
    fn read_rejects_cursor_files() {
        let input: Cursor<&[u8]> = Cursor::new(b"\0\0\x02\0\0\0");
        let err = IconDir::read(input).err().expect("read succeeded");
        assert_eq!(ErrorKind::InvalidData, err.kind());
    }

    #[test]
    fn read_rejects_payload_outside_file() {
        let input: Cursor<&[u8]> = Cursor::new(b"\0\0\x01\0\x01\0\
                      \x10\x10\0\0\x01\0\x20\0\x09\0\0\0\x16\0\0\0\
                      short");
        let err = IconDir::read(input).err().expect("read succeeded");
        assert_eq!(ErrorKind::InvalidData, err.kind());
    }
}
