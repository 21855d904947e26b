use crate::constants::px_to_in;
use crate::layout::{PixelSize, grid_dimensions};
use crate::options::PosterOptions;
use crate::types::*;

/// Calculate statistics for a poster without rendering it
pub fn calculate_statistics(
    image: PixelSize,
    options: &PosterOptions,
) -> Result<PosterStatistics> {
    let page_limit = options.page_limit()?;

    if image.is_empty() {
        return Err(PosterError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    let (columns, rows) = grid_dimensions(image, page_limit);

    // Everything but the last column/row is exactly one limit wide/tall
    let last_column_width_px = image.width - (columns as u32 - 1) * page_limit.width;
    let last_row_height_px = image.height - (rows as u32 - 1) * page_limit.height;

    Ok(PosterStatistics {
        image_width_px: image.width,
        image_height_px: image.height,
        page_limit,
        columns,
        rows,
        pages: columns * rows,
        poster_width_in: px_to_in(image.width, options.dpi),
        poster_height_in: px_to_in(image.height, options.dpi),
        last_column_width_px,
        last_row_height_px,
    })
}
