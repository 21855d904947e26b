mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::StderrLogger;
use poster_tile::{ImageFile, PosterOptions, PosterStatistics};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "postr", about = "Split an image into printable poster pages", version)]
struct Cli {
    /// More log output (repeat for debug/trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn one image into a tiled poster PDF
    Tile {
        /// Input PNG image
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, default_value = "Output.pdf")]
        output: PathBuf,

        /// Also write every tile as a PNG into this directory
        #[arg(long)]
        export_tiles: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Turn every PNG in a directory into its own poster PDF
    Batch {
        /// Directory with input PNG images
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Directory for the output PDFs (created if missing)
        #[arg(short, long)]
        output_dir: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Load settings from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print resolution in pixels per inch
    #[arg(long, value_parser = parse_dpi_arg)]
    dpi: Option<u32>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Sheet margin in inches (uniform on all sides)
    #[arg(long)]
    margin_in: Option<f32>,

    /// Alignment border width in pixels (0 disables it)
    #[arg(long)]
    border_px: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for poster_tile::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for poster_tile::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

fn parse_dpi_arg(value: &str) -> std::result::Result<u32, String> {
    poster_tile::parse_dpi(value).map_err(|e| e.to_string())
}

impl LayoutArgs {
    async fn to_options(&self) -> Result<PosterOptions> {
        let mut options = match &self.config {
            Some(path) => PosterOptions::load(path)
                .await
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PosterOptions::default(),
        };

        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(margin) = self.margin_in {
            options.margins = poster_tile::Margins::uniform(margin);
        }
        if let Some(border) = self.border_px {
            options.border_px = border;
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    StderrLogger::new(StderrLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Tile {
            input,
            output,
            export_tiles,
            stats_only,
            layout,
        } => {
            let options = layout.to_options().await?;

            // Calculate and show statistics
            let size = poster_tile::read_dimensions(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;
            let stats = poster_tile::calculate_statistics(size, &options)?;
            print_statistics(&stats, &options);

            if stats_only {
                return Ok(());
            }

            let image = poster_tile::load_image(&input)
                .await
                .with_context(|| format!("loading {}", input.display()))?;
            let poster = poster_tile::build_poster(image, &options).await?;

            if let Some(dir) = export_tiles {
                let stem = file_label(&input);
                let written = poster_tile::export_tiles(&poster.tiles, &dir, &stem).await?;
                println!("Exported {} tiles → {}", written.len(), dir.display());
            }

            let pages = poster.page_count();
            poster_tile::save_pdf(poster.document, &output).await?;
            println!("Poster ({} pages) → {}", pages, output.display());
        }

        Commands::Batch {
            input_dir,
            output_dir,
            layout,
        } => {
            let options = layout.to_options().await?;
            let inputs = list_png_files(&input_dir).await?;
            if inputs.is_empty() {
                bail!("no PNG files in {}", input_dir.display());
            }

            tokio::fs::create_dir_all(&output_dir).await?;

            let mut failures = 0;
            for input in &inputs {
                let file_name = input.with_extension("pdf");
                let output = output_dir.join(file_name.file_name().unwrap_or_default());
                match process_one(input, &output, &options).await {
                    Ok(pages) => println!(
                        "{} ({} pages) → {}",
                        input.display(),
                        pages,
                        output.display()
                    ),
                    Err(e) => {
                        log::error!("{}: {:#}", input.display(), e);
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                bail!("{} of {} images failed", failures, inputs.len());
            }
        }
    }

    Ok(())
}

async fn process_one(input: &Path, output: &Path, options: &PosterOptions) -> Result<usize> {
    let poster = poster_tile::build_poster_from(ImageFile::new(input), options).await?;
    let pages = poster.page_count();
    poster_tile::save_pdf(poster.document, output).await?;
    Ok(pages)
}

async fn list_png_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn print_statistics(stats: &PosterStatistics, options: &PosterOptions) {
    println!("Poster Statistics:");
    println!(
        "  Image: {}x{} px",
        stats.image_width_px, stats.image_height_px
    );
    println!(
        "  Page limit: {}x{} px ({} {} at {} DPI)",
        stats.page_limit.width,
        stats.page_limit.height,
        options.paper_size.name(),
        match options.orientation {
            poster_tile::Orientation::Portrait => "portrait",
            poster_tile::Orientation::Landscape => "landscape",
        },
        options.dpi
    );
    println!("  Grid: {} columns x {} rows", stats.columns, stats.rows);
    println!("  Pages: {}", stats.pages);
    println!(
        "  Printed size: {:.2} x {:.2} in",
        stats.poster_width_in, stats.poster_height_in
    );
    println!(
        "  Last column/row: {} px / {} px",
        stats.last_column_width_px, stats.last_row_height_px
    );
}
