use crate::constants::{DEFAULT_BORDER_PX, DEFAULT_DPI, MAX_PAGE_PT, POINTS_PER_INCH, in_to_pt};
use crate::layout::PageLimit;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Poster configuration: resolution, paper and border settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    /// Pixels per printed inch
    pub dpi: u32,

    // Output paper
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub margins: Margins,

    /// Width of the black alignment border drawn on every tile (0 = none)
    pub border_px: u32,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            paper_size: PaperSize::Letter,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            border_px: DEFAULT_BORDER_PX,
        }
    }
}

impl PosterOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(PosterError::InvalidDpi("DPI must be positive".to_string()));
        }

        let (page_width_pt, page_height_pt) = self.page_dimensions_pt();
        let valid_side = |pt: f32| pt.is_finite() && pt > 0.0 && pt <= MAX_PAGE_PT;
        if !(valid_side(page_width_pt) && valid_side(page_height_pt)) {
            return Err(PosterError::Config(format!(
                "Paper size must be positive and at most {}pt per side, got {}x{}pt",
                MAX_PAGE_PT, page_width_pt, page_height_pt
            )));
        }

        let m = &self.margins;
        if [m.top_in, m.bottom_in, m.left_in, m.right_in]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(PosterError::Config(
                "Margins must be finite and non-negative".to_string(),
            ));
        }

        let (printable_width_pt, printable_height_pt) = self.printable_area_pt();
        if printable_width_pt <= 0.0 || printable_height_pt <= 0.0 {
            return Err(PosterError::Config(format!(
                "Margins leave no printable area on {} paper",
                self.paper_size.name()
            )));
        }

        let limit = self.raw_page_limit();
        if limit.width == 0 || limit.height == 0 {
            return Err(PosterError::Config(format!(
                "Printable area holds no whole pixel at {} DPI",
                self.dpi
            )));
        }

        Ok(())
    }

    /// Output page size in points, orientation applied
    pub fn page_dimensions_pt(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Page size minus margins, in points
    pub fn printable_area_pt(&self) -> (f32, f32) {
        let (w, h) = self.page_dimensions_pt();
        let m = &self.margins;
        (
            w - in_to_pt(m.left_in) - in_to_pt(m.right_in),
            h - in_to_pt(m.top_in) - in_to_pt(m.bottom_in),
        )
    }

    /// Largest tile, in pixels, that prints inside the margins at this DPI.
    pub fn page_limit(&self) -> Result<PageLimit> {
        self.validate()?;
        Ok(self.raw_page_limit())
    }

    fn raw_page_limit(&self) -> PageLimit {
        let (w_pt, h_pt) = self.printable_area_pt();
        let to_px = |pt: f32| (pt * self.dpi as f32 / POINTS_PER_INCH).floor().max(0.0) as u32;
        PageLimit::new(to_px(w_pt), to_px(h_pt))
    }
}

/// Parse a DPI value supplied as text (CLI flag, form field).
///
/// Anything that is not a positive integer fitting in `u32` is rejected with
/// `InvalidDpi`.
pub fn parse_dpi(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(dpi) if dpi > 0 && dpi <= u32::MAX as i64 => Ok(dpi as u32),
        Ok(dpi) if dpi > 0 => Err(PosterError::InvalidDpi(format!(
            "{} exceeds the largest supported resolution ({})",
            dpi,
            u32::MAX
        ))),
        Ok(dpi) => Err(PosterError::InvalidDpi(format!(
            "{} is not a positive resolution",
            dpi
        ))),
        Err(_) => Err(PosterError::InvalidDpi(format!(
            "'{}' is not a whole number",
            trimmed
        ))),
    }
}
