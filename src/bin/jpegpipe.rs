//! jpegpipe CLI - baseline JPEG block-transform pipeline utility.
//!
//! Drives the full lossy pipeline (color conversion, chroma subsampling,
//! DCT, quantization, entropy coding) over plain-text PPM images.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jpegpipe_rs::{Image, PipelineDecoder, PipelineEncoder};

/// Baseline JPEG block-transform pipeline for plain-text pixel images
#[derive(Parser)]
#[command(name = "jpegpipe")]
#[command(author = "jpegpipe-rs contributors")]
#[command(version)]
#[command(about = "Run the DCT/quantization/entropy pipeline over PPM images", long_about = None)]
#[command(after_help = "EXAMPLES:
    jpegpipe roundtrip -i in.ppm -o out.ppm
    jpegpipe info -i in.ppm

SUPPORTED FORMATS:
    Plain-text PPM (P3) with one sample value per line.

Image dimensions must be divisible by the 8x8 block size.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full lossy pipeline and write the reconstructed image
    ///
    /// Loads a PPM image, pushes it through color conversion, chroma
    /// subsampling, DCT, quantization, and entropy coding, then reverses
    /// every stage and saves the result.
    #[command(visible_alias = "r")]
    Roundtrip {
        /// Input PPM file
        #[arg(short, long, help = "Path to the input image file")]
        input: PathBuf,

        /// Output PPM file (extension is normalized to .ppm)
        #[arg(short, long, help = "Path for the reconstructed output file")]
        output: PathBuf,
    },

    /// Display image metadata
    #[command(visible_alias = "i")]
    Info {
        /// Input PPM file
        #[arg(short, long, help = "Path to the image file to inspect")]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roundtrip { input, output } => roundtrip(&input, &output),
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn roundtrip(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let Some(image) = Image::load(input)? else {
        return Err(format!("input file {input:?} does not exist").into());
    };
    let (width, height) = (image.width, image.height);

    let encoded = PipelineEncoder::new().encode(image)?;
    let symbol_count: usize = encoded
        .y
        .iter()
        .chain(&encoded.u)
        .chain(&encoded.v)
        .map(|stream| stream.len())
        .sum();

    let decoded = PipelineDecoder::new().decode(&encoded)?;
    let written = decoded.save(output)?;

    println!(
        "✓ Round-tripped {}x{} image ({} entropy symbols) to {:?}",
        width, height, symbol_count, written
    );
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let Some(image) = Image::load(input)? else {
        return Err(format!("input file {input:?} does not exist").into());
    };

    println!("File: {:?}", input);
    println!("Format: PPM ({})", image.color_space());
    println!("  Dimensions: {}x{}", image.width, image.height);
    println!("  Depth:      {}", image.depth);
    println!("  Pixels:     {}", image.pixels.len());
    println!("  Description: {}", image.description);
    Ok(())
}
