//! Makes the near-white background of an image transparent.
//!
//! ```shell
//! remove_background [INPUT] [OUTPUT]
//! # defaults: input.jpg -> icon.png
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

/// Replace every pixel brighter than 240 on all of red, green and blue with
/// transparent white, and save the result as PNG.
#[derive(Parser, Debug)]
#[command(name = "remove_background")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image path.
    #[arg(value_name = "INPUT", default_value = "input.jpg")]
    input: PathBuf,

    /// Output PNG path.
    #[arg(value_name = "OUTPUT", default_value = "icon.png")]
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
    let (width, height) = icoprep::remove_background(&args.input, &args.output)
        .context("Failed to remove background")?;

    println!("✓ Transparent image created: {}", args.output.display());
    println!("✓ Image size: {width}×{height}");

    Ok(())
}
