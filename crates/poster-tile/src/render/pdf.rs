//! PDF output via lopdf
//!
//! Every tile becomes an image XObject drawn once on its own page. Pixel data
//! is stored as 8-bit DeviceRGB; tiles with transparency carry a DeviceGray
//! soft mask built from the alpha channel.

use crate::constants::{DOCUMENT_TITLE, PDF_VERSION};
use crate::layout::{PagePlacement, Rect};
use crate::tile::Tile;
use crate::types::{PosterError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::DocumentSink;

// =============================================================================
// Sink
// =============================================================================

/// Builds a poster PDF one page at a time.
pub struct PdfSink {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
}

impl PdfSink {
    pub fn new() -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
        }
    }
}

impl Default for PdfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for PdfSink {
    type Output = Document;

    fn append_page(&mut self, tile: &Tile, placement: &PagePlacement) -> Result<()> {
        let image_id = add_tile_image(&mut self.doc, tile)?;
        let xobject_name = format!("T{}", placement.tile_index);

        let mut xobjects = Dictionary::new();
        xobjects.set(xobject_name.as_bytes(), Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = generate_image_command(&xobject_name, &placement.image_rect);
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(placement.page_width_pt),
                Object::Real(placement.page_height_pt),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn finish(self) -> Result<Document> {
        let Self {
            mut doc,
            pages_tree_id,
            page_refs,
        } = self;

        // Create pages tree
        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        doc.objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(Dictionary::from_iter(vec![
            ("Title", Object::string_literal(DOCUMENT_TITLE)),
            ("Producer", Object::string_literal("poster-tile")),
        ]));
        doc.trailer.set("Info", info_id);

        doc.compress();
        Ok(doc)
    }
}

// =============================================================================
// Image XObjects
// =============================================================================

/// Add a tile's pixels to the document as an image XObject.
fn add_tile_image(doc: &mut Document, tile: &Tile) -> Result<ObjectId> {
    let (width, height) = tile.image.dimensions();
    let pixel_count = width as usize * height as usize;

    let mut rgb = channel_buffer(pixel_count * 3, width, height)?;
    for pixel in tile.image.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
    }

    let mut image_dict = image_dictionary(width, height, "DeviceRGB");

    if tile.has_transparency() {
        let mut alpha = channel_buffer(pixel_count, width, height)?;
        alpha.extend(tile.image.pixels().map(|p| p[3]));
        let smask_id = doc.add_object(Stream::new(
            image_dictionary(width, height, "DeviceGray"),
            alpha,
        ));
        image_dict.set("SMask", Object::Reference(smask_id));
    }

    Ok(doc.add_object(Stream::new(image_dict, rgb)))
}

/// Empty buffer with room for `len` bytes, or `Allocation` if it cannot be had.
fn channel_buffer(len: usize, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PosterError::Allocation { width, height })?;
    Ok(buffer)
}

fn image_dictionary(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

/// Content stream drawing an image XObject into `rect`.
///
/// Images occupy the unit square, so the transform scales straight to the
/// target size in points.
fn generate_image_command(xobject_name: &str, rect: &Rect) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}
