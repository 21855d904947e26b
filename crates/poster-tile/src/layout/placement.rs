//! Tile placement on output pages
//!
//! Tiles are printed at their true size (pixels / DPI) with the top-left
//! corner pinned to the left and top sheet margins. No centering, no scaling.

use crate::constants::{in_to_pt, px_to_in, px_to_pt};
use crate::options::PosterOptions;

use super::{PagePlacement, PixelSize, Rect};

/// Calculate where a tile of the given pixel size lands on its page.
///
/// PDF user space grows upwards, so the image's bottom edge sits at
/// `page_height - top_margin - tile_height`.
///
/// # Arguments
/// * `tile_index` - Position of the tile in partition order
/// * `tile_size` - Tile dimensions in pixels
/// * `options` - Validated poster options (DPI must be positive)
pub fn place_tile(tile_index: usize, tile_size: PixelSize, options: &PosterOptions) -> PagePlacement {
    let (page_width_pt, page_height_pt) = options.page_dimensions_pt();

    let width_pt = px_to_pt(tile_size.width, options.dpi);
    let height_pt = px_to_pt(tile_size.height, options.dpi);

    let x = in_to_pt(options.margins.left_in);
    let y = page_height_pt - in_to_pt(options.margins.top_in) - height_pt;

    PagePlacement {
        tile_index,
        page_width_pt,
        page_height_pt,
        image_rect: Rect::new(x, y, width_pt, height_pt),
        width_in: px_to_in(tile_size.width, options.dpi),
        height_in: px_to_in(tile_size.height, options.dpi),
    }
}
