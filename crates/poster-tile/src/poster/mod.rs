//! Poster building - splitting one image across printable pages
//!
//! This module orchestrates the process:
//! 1. Validate options and derive the page limit
//! 2. Partition the image into page-sized rectangles
//! 3. Extract each rectangle as a bordered tile
//! 4. Compose one PDF page per tile

mod compose;
mod io;

pub use compose::compose;
pub use io::{export_tiles, load_image, pdf_bytes, read_dimensions, save_pdf};

use crate::layout::{PixelRect, PixelSize, partition};
use crate::options::PosterOptions;
use crate::render::PdfSink;
use crate::source::ImageSource;
use crate::tile::{Tile, extract_tiles};
use crate::types::*;
use image::{DynamicImage, GenericImageView, Rgba};
use lopdf::Document;

/// Everything produced for one poster
#[derive(Debug)]
pub struct Poster {
    /// Partition rectangles in row-major order
    pub rects: Vec<PixelRect>,
    /// Bordered tiles, one per rectangle
    pub tiles: Vec<Tile>,
    /// Finished document, one page per tile
    pub document: Document,
}

impl Poster {
    pub fn page_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Partition an image and extract its bordered tiles.
///
/// Options are validated first, so a bad DPI fails before any rectangle is
/// computed.
pub fn tile_image<I>(image: &I, options: &PosterOptions) -> Result<Vec<Tile>>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let limit = options.page_limit()?;
    let (width, height) = image.dimensions();
    let rects = partition(PixelSize::new(width, height), limit)?;
    log::debug!(
        "Partitioned {}x{} image into {} tiles (limit {}x{})",
        width,
        height,
        rects.len(),
        limit.width,
        limit.height
    );
    extract_tiles(image, &rects, options.border_px)
}

/// Build a poster synchronously
pub fn build_poster_sync<I>(image: &I, options: &PosterOptions) -> Result<Poster>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let tiles = tile_image(image, options)?;
    let rects = tiles.iter().map(|tile| tile.rect).collect();
    let document = compose(&tiles, options, PdfSink::new())?;

    log::info!(
        "Built {}-page poster from {}x{} image at {} DPI",
        tiles.len(),
        image.width(),
        image.height(),
        options.dpi
    );

    Ok(Poster {
        rects,
        tiles,
        document,
    })
}

/// Main poster function
pub async fn build_poster(image: DynamicImage, options: &PosterOptions) -> Result<Poster> {
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || build_poster_sync(&image, &options)).await?
}

/// Decode `source` and build its poster
pub async fn build_poster_from<S>(source: S, options: &PosterOptions) -> Result<Poster>
where
    S: ImageSource + Send + 'static,
{
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        log::debug!("Decoding {}", source.label());
        let image = source.decode()?;
        build_poster_sync(&image, &options)
    })
    .await?
}
