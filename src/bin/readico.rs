//! Lists the entries of an ICO file, optionally extracting each as PNG.
//!
//! ```shell
//! readico <path/to/file.ico>
//! readico --extract <path/to/file.ico>
//! # entries will be saved to path/to/file.<W>x<H>.png
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use icoprep::IconDir;

/// Print the directory of an ICO file.
#[derive(Parser, Debug)]
#[command(name = "readico")]
#[command(version, about, long_about = None)]
struct Args {
    /// ICO file to inspect.
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Also save every entry as a PNG next to the ICO file.
    #[arg(short, long)]
    extract: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    icoprep::logging::init(env!("CARGO_CRATE_NAME"), args.verbose);

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let file = File::open(&args.path)
        .with_context(|| format!("Failed to open {}", args.path.display()))?;
    let dir = IconDir::read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    println!("ICO file contains {} entries:", dir.entries.len());
    for entry in &dir.entries {
        println!("  {:>3}x{:<3}  {:>2} bpp  {:?}  {} bytes",
                 entry.width(),
                 entry.height(),
                 entry.bits_per_pixel(),
                 entry.encoding(),
                 entry.data_length());
        if !args.extract {
            continue;
        }
        let image = entry.decode_image().with_context(|| {
            format!("Failed to decode {}x{} entry",
                    entry.width(),
                    entry.height())
        })?;
        let png_path = args.path.with_extension(format!("{}x{}.png",
                                                        entry.width(),
                                                        entry.height()));
        let mut writer = BufWriter::new(File::create(&png_path)
            .with_context(|| format!("Failed to create {}",
                                     png_path.display()))?);
        icoprep::pngio::write_png(&image, &mut writer)?;
        writer.flush()?;
        tracing::info!("Extracted {}", png_path.display());
    }

    Ok(())
}
