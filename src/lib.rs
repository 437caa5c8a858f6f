//! Library for preparing application icons.
//!
//! Two one-shot transformations are provided:
//!
//! * [`generate_icon`](generator/fn.generate_icon.html) encodes a single
//!   source image into a Windows ICO file holding 16x16, 32x32, 48x48,
//!   64x64, 128x128 and 256x256 PNG entries.
//! * [`remove_background`](filter/fn.remove_background.html) turns every
//!   near-white pixel (red, green and blue all above 240) of an image into
//!   transparent white and saves the result as PNG.
//!
//! The [`IconDir`](struct.IconDir.html) codec can also read existing ICO
//! files.  See https://en.wikipedia.org/wiki/ICO_(file_format) for more
//! information about the file format.
//!
//! ```no_run
//! # fn main() -> icoprep::Result<()> {
//! icoprep::remove_background("logo.jpg", "icon.png")?;
//! icoprep::generate_icon("icon.png", "icon.ico")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod entry;
pub mod error;
pub mod filter;
pub mod generator;
mod icondir;
mod iconsize;
pub mod load;
pub mod logging;
pub mod pngio;

pub use entry::IconEntry;
pub use error::{Error, Result};
pub use filter::remove_background;
pub use generator::{build_icon_dir, generate_icon};
pub use icondir::IconDir;
pub use iconsize::{Encoding, IconSize};
