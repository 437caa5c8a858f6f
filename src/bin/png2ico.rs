//! Creates a multi-resolution ICO file from a single image.
//!
//! ```shell
//! png2ico [INPUT] [OUTPUT]
//! # defaults: icon.png -> icon.ico
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

/// Encode an image as a Windows icon holding 16 to 256 pixel sizes.
#[derive(Parser, Debug)]
#[command(name = "png2ico")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image path (PNG or JPEG).
    #[arg(value_name = "INPUT", default_value = "icon.png")]
    input: PathBuf,

    /// Output ICO path.
    #[arg(value_name = "OUTPUT", default_value = "icon.ico")]
    output: PathBuf,

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
    let dir = icoprep::generate_icon(&args.input, &args.output)
        .context("Failed to generate icon")?;
    tracing::debug!("Wrote {} entries ({} bytes)",
                    dir.entries.len(),
                    dir.total_length());

    println!("✓ ICO file created: {}", args.output.display());

    Ok(())
}
