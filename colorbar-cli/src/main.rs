mod widget;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colorbar_scales::color::schemes::Scheme;
use colorbar_scenegraph::png::svg_to_png;
use log::info;
use strum::IntoEnumIterator;

use widget::WidgetSpec;

/// Renders colorbar legends described in JSON
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a widget description to SVG, and optionally PNG
    Render {
        /// Path to the JSON widget description
        file_path: PathBuf,

        /// Output path for the SVG (defaults to the input path with an .svg extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a PNG next to the SVG
        #[arg(long)]
        png: bool,

        /// Scale factor for the PNG
        #[arg(short, long, default_value_t = 2.0)]
        scale: f32,
    },

    /// List the named color schemes
    Schemes,
}

fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))
}

fn render(file_path: &Path, output: Option<PathBuf>, png: bool, scale: f32) -> anyhow::Result<()> {
    let json = fs::read_to_string(file_path)
        .with_context(|| format!("cannot read {}", file_path.display()))?;
    let scene = WidgetSpec::from_json(&json)?.render()?;
    let svg = scene.to_svg()?;

    let svg_path = output.unwrap_or_else(|| file_path.with_extension("svg"));
    write_file(&svg_path, svg.as_bytes())?;
    info!("Saved SVG to {}", svg_path.display());

    if png {
        let png_path = svg_path.with_extension("png");
        write_file(&png_path, &svg_to_png(&svg, scale)?)?;
        info!("Saved PNG to {}", png_path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            file_path,
            output,
            png,
            scale,
        } => render(&file_path, output, png, scale),
        Commands::Schemes => {
            for scheme in Scheme::iter() {
                let kind = if scheme.is_categorical() {
                    "categorical"
                } else {
                    "continuous"
                };
                println!("{scheme}\t{kind}\t{}", scheme.colors()?.len());
            }
            Ok(())
        }
    }
}
