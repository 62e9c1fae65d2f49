use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use icon_png::{
    icons::{icon_file_name, render_icon, Gradient, ICON_SIZES},
    DEFAULT_COMPRESSION_LEVEL,
};

#[derive(Debug, Parser)]
#[command(
    name = "create-icons",
    about = "Generate gradient PNG icons for a browser extension"
)]
struct Args {
    /// Output directory.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Icon sizes to generate.
    #[arg(short, long, value_delimiter = ',', value_name = "SIZES", default_values_t = ICON_SIZES)]
    sizes: Vec<u32>,

    /// zlib compression level (0-10).
    #[arg(short, long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    level: u8,

    /// Also write an `icons.json` manifest fragment next to the icons.
    #[arg(long)]
    manifest: bool,

    /// Log every icon written.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let verbosity = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    let gradient = Gradient::default();
    // Encode everything before touching the filesystem so a bad size leaves no partial output.
    let icons = args
        .sizes
        .iter()
        .map(|&size| {
            render_icon(size, &gradient, args.level)
                .map(|png| (size, png))
                .with_context(|| format!("Failed to encode {size}x{size} icon"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory {}", args.out_dir.display())
    })?;
    let mut manifest = serde_json::Map::new();
    for (size, png) in icons {
        let file_name = icon_file_name(size);
        let path = args.out_dir.join(&file_name);
        fs::write(&path, &png).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Created {file_name} ({size}x{size}, {} bytes)", png.len());
        manifest.insert(size.to_string(), file_name.into());
    }

    if args.manifest {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
        let results = serde_json::json!({
            "generated_at": now,
            "icons": manifest,
        });
        let path = args.out_dir.join("icons.json");
        fs::write(&path, serde_json::to_string_pretty(&results)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote manifest to {}", path.display());
    }
    Ok(())
}
