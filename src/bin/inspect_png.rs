use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use icon_png::{
    chunks::{iter_chunks, Chunk},
    decode, PngDecoder,
};

#[derive(Debug, Parser)]
#[command(
    name = "inspect-png",
    about = "List a PNG's chunks and check that it decodes"
)]
struct Args {
    /// PNG file to inspect.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Log decoder progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let verbosity = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let input = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    PngDecoder::new(&input).with_context(|| format!("{} is not a PNG", args.file.display()))?;
    for raw in iter_chunks(&input[8..]) {
        let raw = raw.context("Chunk list is corrupt")?;
        print!(
            "{} length={} crc={:08x}",
            raw.type_name(),
            raw.data.len(),
            raw.crc
        );
        if let Chunk::IHDR(header) = Chunk::parse(raw)? {
            print!(
                " {}x{} depth={} color={:?} interlace={:?}",
                header.width,
                header.height,
                header.bit_depth,
                header.color_type,
                header.interlace_method
            );
        }
        println!();
    }

    let image = decode(&input)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;
    println!(
        "decoded {}x{} ({} pixels)",
        image.width(),
        image.height(),
        image.pixels.len()
    );
    Ok(())
}
