//! Image and document I/O for posters

use crate::layout::PixelSize;
use crate::source::{ImageFile, ImageSource};
use crate::tile::Tile;
use crate::types::*;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use lopdf::Document;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Load and decode a source image
pub async fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let source = ImageFile::new(path);
    let image = tokio::task::spawn_blocking(move || source.decode()).await??;
    Ok(image)
}

/// Read an image's pixel size from its header without decoding the pixels
pub async fn read_dimensions(path: impl AsRef<Path>) -> Result<PixelSize> {
    let path = path.as_ref().to_owned();
    let (width, height) = tokio::task::spawn_blocking(move || {
        let reader = ImageReader::open(&path)?.with_guessed_format()?;
        Ok::<_, PosterError>(reader.into_dimensions()?)
    })
    .await??;
    Ok(PixelSize::new(width, height))
}

/// Serialize a document to memory
pub fn pdf_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save the poster document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || pdf_bytes(doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Write every tile as `{stem}-part-{index}.png` inside `dir`.
///
/// Returns the written paths in tile order. The directory is created if needed.
/// Tiles are encoded in place on the calling task; only the writes are async.
pub async fn export_tiles(
    tiles: &[Tile],
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref().to_owned();
    tokio::fs::create_dir_all(&dir).await?;

    let mut written = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let bytes = encode_png(&tile.image)?;

        let path = dir.join(tile_file_name(stem, tile.index));
        tokio::fs::write(&path, bytes).await?;
        log::debug!("Exported tile {} to {}", tile.index, path.display());
        written.push(path);
    }
    Ok(written)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

pub(crate) fn tile_file_name(stem: &str, index: usize) -> String {
    format!("{}-part-{}.png", stem, index)
}
