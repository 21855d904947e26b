//! Grid partitioning
//!
//! This module cuts the source image into a row-major grid of rectangles,
//! each small enough to print on one page.

use crate::types::{PosterError, Result};

use super::{PageLimit, PixelRect, PixelSize};

// =============================================================================
// Partitioning
// =============================================================================

/// Split an image into page-sized rectangles.
///
/// An image strictly smaller than the limit in both directions comes back as
/// a single rectangle. Anything else is walked in row bands of at most
/// `limit.height` pixels, each band cut left to right into segments of at most
/// `limit.width` pixels. Only the last segment of a band can be narrower than
/// the limit and only the last band can be shorter.
///
/// A dimension exactly equal to the limit skips the single-rectangle shortcut
/// but still yields one full-size segment along that axis.
///
/// # Arguments
/// * `image` - Source image size in pixels
/// * `limit` - Largest tile that fits one page
pub fn partition(image: PixelSize, limit: PageLimit) -> Result<Vec<PixelRect>> {
    if image.is_empty() {
        return Err(PosterError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    if limit.width == 0 || limit.height == 0 {
        return Err(PosterError::Config(format!(
            "Page limit must be at least 1x1 pixels, got {}x{}",
            limit.width, limit.height
        )));
    }

    if image.width < limit.width && image.height < limit.height {
        return Ok(vec![PixelRect::from_size(image)]);
    }

    let (cols, rows) = grid_dimensions(image, limit);
    let mut rects = Vec::with_capacity(cols * rows);

    let mut base_y = 0;
    let mut extra_y = image.height;
    while extra_y > 0 {
        let target_y = extra_y.min(limit.height);

        let mut base_x = 0;
        let mut extra_x = image.width;
        while extra_x > 0 {
            let target_x = extra_x.min(limit.width);
            rects.push(PixelRect::new(
                base_x,
                base_y,
                base_x + target_x,
                base_y + target_y,
            ));
            base_x += target_x;
            extra_x -= target_x;
        }

        base_y += target_y;
        extra_y -= target_y;
    }

    Ok(rects)
}

/// Number of (columns, rows) the partitioner produces for these inputs.
///
/// Both inputs must be non-empty.
pub fn grid_dimensions(image: PixelSize, limit: PageLimit) -> (usize, usize) {
    if image.width < limit.width && image.height < limit.height {
        return (1, 1);
    }
    (
        image.width.div_ceil(limit.width) as usize,
        image.height.div_ceil(limit.height) as usize,
    )
}

// =============================================================================
// Tests
// =============================================================================
