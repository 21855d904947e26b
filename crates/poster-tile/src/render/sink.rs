//! Output document abstraction
//!
//! The page composer only ever appends pages and finishes; anything that can
//! do those two things can receive a poster.

use crate::layout::PagePlacement;
use crate::tile::Tile;
use crate::types::Result;

/// Destination for composed poster pages.
pub trait DocumentSink {
    /// What `finish` hands back (a PDF document, a byte buffer, a page log...)
    type Output;

    /// Append one page showing `tile` at `placement`.
    ///
    /// Pages must end up in the order they are appended.
    fn append_page(&mut self, tile: &Tile, placement: &PagePlacement) -> Result<()>;

    /// Number of pages appended so far
    fn page_count(&self) -> usize;

    /// Finalize the document. No pages may be added afterwards.
    fn finish(self) -> Result<Self::Output>;
}
