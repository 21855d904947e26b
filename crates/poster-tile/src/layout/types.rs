//! Layout data types for poster tiling
//!
//! Pixel-space types describe how the source image is cut up; the point-space
//! `Rect` and `PagePlacement` describe where a tile lands on its page.

/// Image or tile dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for PixelSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Largest tile, in pixels, that fits the printable area of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    pub width: u32,
    pub height: u32,
}

impl PageLimit {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned pixel region, half-open on the max edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelRect {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at the origin covering the whole size
    pub fn from_size(size: PixelSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// True when the two regions share at least one pixel
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Final placement of one tile on its output page
///
/// Everything the document sink needs to emit the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlacement {
    /// Index of the tile (and of the page) in partition order
    pub tile_index: usize,
    /// Page width in points
    pub page_width_pt: f32,
    /// Page height in points
    pub page_height_pt: f32,
    /// Where the tile image is drawn, in points (PDF origin is bottom-left)
    pub image_rect: Rect,
    /// Printed tile width in inches
    pub width_in: f32,
    /// Printed tile height in inches
    pub height_in: f32,
}
