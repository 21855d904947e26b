use crate::constants::{POINTS_PER_INCH, mm_to_pt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid DPI: {0}")]
    InvalidDpi(String),
    #[error("Image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Could not allocate a {width}x{height} tile buffer")]
    Allocation { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    #[default]
    Letter,
    Legal,
    Tabloid,
    Custom { width_in: f32, height_in: f32 },
}

impl PaperSize {
    /// Base dimensions in points, always portrait for the standard sizes.
    ///
    /// US sizes are exact multiples of 72pt; the ISO sizes go through millimeters.
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (mm_to_pt(297.0), mm_to_pt(420.0)),
            PaperSize::A4 => (mm_to_pt(210.0), mm_to_pt(297.0)),
            PaperSize::A5 => (mm_to_pt(148.0), mm_to_pt(210.0)),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Tabloid => (792.0, 1224.0),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in * POINTS_PER_INCH, height_in * POINTS_PER_INCH),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Sheet margins in inches. The tile is anchored at the left/top margin;
/// right and bottom only bound the printable area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top_in: f32,
    pub bottom_in: f32,
    pub left_in: f32,
    pub right_in: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(crate::constants::DEFAULT_MARGIN_IN)
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_in: f32) -> Self {
        Self {
            top_in: margin_in,
            bottom_in: margin_in,
            left_in: margin_in,
            right_in: margin_in,
        }
    }
}

/// Statistics about a poster before it is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct PosterStatistics {
    /// Source image width in pixels
    pub image_width_px: u32,
    /// Source image height in pixels
    pub image_height_px: u32,
    /// Largest tile that fits one page, in pixels
    pub page_limit: crate::layout::PageLimit,
    /// Tiles per row
    pub columns: usize,
    /// Number of row bands
    pub rows: usize,
    /// Output page count (one page per tile)
    pub pages: usize,
    /// Printed poster width in inches once reassembled
    pub poster_width_in: f32,
    /// Printed poster height in inches once reassembled
    pub poster_height_in: f32,
    /// Width of the rightmost column in pixels
    pub last_column_width_px: u32,
    /// Height of the bottom row in pixels
    pub last_row_height_px: u32,
}
