//! Shared constants for poster tiling
//!
//! Defaults describe the reference layout: US Letter portrait, half-inch
//! margins, 300 DPI, which gives a 2250 x 3000 pixel page limit.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (PDF user space unit)
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// Convert a pixel span to points at the given resolution
#[inline]
pub fn px_to_pt(px: u32, dpi: u32) -> f32 {
    px as f32 * POINTS_PER_INCH / dpi as f32
}

/// Convert a pixel span to inches at the given resolution
#[inline]
pub fn px_to_in(px: u32, dpi: u32) -> f32 {
    px as f32 / dpi as f32
}

// =============================================================================
// Defaults
// =============================================================================

/// Default output resolution
pub const DEFAULT_DPI: u32 = 300;

/// Default margin on every side of the sheet (inches)
pub const DEFAULT_MARGIN_IN: f32 = 0.5;

/// Default alignment border width (pixels)
pub const DEFAULT_BORDER_PX: u32 = 2;

// =============================================================================
// Output
// =============================================================================

/// Largest page side a PDF viewer must support (200in)
pub const MAX_PAGE_PT: f32 = 14_400.0;

/// PDF version written by the page composer
pub const PDF_VERSION: &str = "1.7";

/// Title stored in the document info dictionary
pub const DOCUMENT_TITLE: &str = "Poster";
