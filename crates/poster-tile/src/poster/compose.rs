//! Page composition: one page per tile, in partition order

use crate::layout::place_tile;
use crate::options::PosterOptions;
use crate::render::DocumentSink;
use crate::tile::Tile;
use crate::types::*;

/// Append one page per tile to `sink` and finish it.
///
/// Each tile is printed at `pixels / dpi` inches, pinned to the left/top
/// margin of a page of the configured paper size.
pub fn compose<S: DocumentSink>(
    tiles: &[Tile],
    options: &PosterOptions,
    mut sink: S,
) -> Result<S::Output> {
    options.validate()?;

    for tile in tiles {
        let placement = place_tile(tile.index, tile.size(), options);
        log::debug!(
            "Page {}: tile {} at {:.2}x{:.2}in",
            sink.page_count() + 1,
            tile.rect,
            placement.width_in,
            placement.height_in
        );
        sink.append_page(tile, &placement)?;
    }

    sink.finish()
}
