//! Tile extraction and border annotation
//!
//! Each partition rectangle is copied into its own RGBA buffer, then a solid
//! black border is painted over the tile edges so the printed pages can be
//! trimmed and lined up. Tiles never share pixels with each other or with the
//! source image.

use crate::layout::{PixelRect, PixelSize};
use crate::types::{PosterError, Result};
use image::{GenericImageView, Rgba, RgbaImage};

/// Border color painted over tile edges
pub const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// One page worth of the source image
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Position in partition order
    pub index: usize,
    /// Region of the source image this tile was cut from
    pub rect: PixelRect,
    /// Owned pixel buffer, same size as `rect`
    pub image: RgbaImage,
}

impl Tile {
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.image.width(), self.image.height())
    }

    /// True if any pixel is not fully opaque
    pub fn has_transparency(&self) -> bool {
        self.image.pixels().any(|p| p[3] != u8::MAX)
    }
}

/// Copy one rectangle of `image` into a new tile and draw its border.
///
/// # Arguments
/// * `image` - Source image; only read
/// * `rect` - Region to copy, must lie inside the image
/// * `index` - Tile position in partition order
/// * `border_px` - Border width in pixels, 0 for none
pub fn extract_tile<I>(image: &I, rect: PixelRect, index: usize, border_px: u32) -> Result<Tile>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (image_width, image_height) = image.dimensions();
    if rect.width() == 0
        || rect.height() == 0
        || rect.max_x > image_width
        || rect.max_y > image_height
    {
        return Err(PosterError::Config(format!(
            "Tile {} {} is empty or outside the {}x{} image",
            index, rect, image_width, image_height
        )));
    }

    let mut buffer = allocate_tile(rect.width(), rect.height())?;
    for (x, y, pixel) in buffer.enumerate_pixels_mut() {
        *pixel = image.get_pixel(rect.min_x + x, rect.min_y + y);
    }

    draw_border(&mut buffer, border_px);

    Ok(Tile {
        index,
        rect,
        image: buffer,
    })
}

/// Extract every rectangle, in order.
pub fn extract_tiles<I>(image: &I, rects: &[PixelRect], border_px: u32) -> Result<Vec<Tile>>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    rects
        .iter()
        .enumerate()
        .map(|(index, &rect)| {
            log::debug!("Extracting tile {} from {}", index, rect);
            extract_tile(image, rect, index, border_px)
        })
        .collect()
}

/// Paint the alignment border over a tile in place.
pub fn draw_border(tile: &mut RgbaImage, border_px: u32) {
    if border_px == 0 {
        return;
    }
    let (width, height) = tile.dimensions();
    for (x, y, pixel) in tile.enumerate_pixels_mut() {
        if is_border(x, y, width, height, border_px) {
            *pixel = BORDER_COLOR;
        }
    }
}

/// Whether tile-local pixel `(x, y)` falls in the border band.
///
/// The comparisons are inclusive on both sides: with a 2px border the band is
/// three pixels wide on the left/top (0, 1, 2) and two on the right/bottom.
pub fn is_border(x: u32, y: u32, width: u32, height: u32, border_px: u32) -> bool {
    border_px > 0
        && (x <= border_px
            || x.saturating_add(border_px) >= width
            || y <= border_px
            || y.saturating_add(border_px) >= height)
}

fn allocate_tile(width: u32, height: u32) -> Result<RgbaImage> {
    let failed = || PosterError::Allocation { width, height };

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(failed)?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| failed())?;
    data.resize(len, 0);

    RgbaImage::from_raw(width, height, data).ok_or_else(failed)
}
