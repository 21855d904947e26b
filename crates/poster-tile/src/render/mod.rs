//! Document rendering for posters
//!
//! - `DocumentSink`: the append-page / finish interface the composer writes to
//! - `PdfSink`: lopdf implementation embedding tiles as image XObjects

mod pdf;
mod sink;

pub use pdf::PdfSink;
pub use sink::DocumentSink;
