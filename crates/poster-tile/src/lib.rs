pub mod constants;
pub mod layout;
mod options;
pub mod poster;
pub mod render;
mod source;
mod stats;
pub mod tile;
mod types;

pub use layout::{PageLimit, PagePlacement, PixelRect, PixelSize, partition};
pub use options::*;
pub use poster::{
    Poster, build_poster, build_poster_from, build_poster_sync, compose, export_tiles, load_image,
    pdf_bytes, read_dimensions, save_pdf, tile_image,
};
pub use render::{DocumentSink, PdfSink};
pub use source::{ImageBytes, ImageFile, ImageSource};
pub use stats::calculate_statistics;
pub use tile::{Tile, extract_tile, extract_tiles};
pub use types::*;
