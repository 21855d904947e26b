use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId};
use poster_tile::tile::is_border;
use poster_tile::*;

fn create_test_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x + y) % 256) as u8, 255])
    })
}

/// 30 DPI keeps test images small: Letter limit becomes 225 x 300 px
fn options_30dpi() -> PosterOptions {
    PosterOptions {
        dpi: 30,
        ..Default::default()
    }
}

fn page_image(doc: &Document, page_id: ObjectId) -> &lopdf::Stream {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let (_, image_ref) = xobjects.iter().next().unwrap();
    doc.get_object(image_ref.as_reference().unwrap())
        .unwrap()
        .as_stream()
        .unwrap()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    let page = doc.get_dictionary(page_id).unwrap();
    page.get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| match v {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("MediaBox entry {:?}", other),
        })
        .collect()
}

/// Stream data with filters undone (uncompressed streams come back as-is)
fn stream_data(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let page = doc.get_dictionary(page_id).unwrap();
    let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    String::from_utf8(stream_data(stream)).unwrap()
}

fn int(stream: &lopdf::Stream, key: &[u8]) -> i64 {
    stream.dict.get(key).unwrap().as_i64().unwrap()
}

// =============================================================================
// Partitioning scenarios at the reference 300 DPI
// =============================================================================

#[test]
fn test_scenario_single_page() {
    let limit = PosterOptions::default().page_limit().unwrap();
    let rects = partition(PixelSize::new(2000, 2500), limit).unwrap();
    assert_eq!(rects, vec![PixelRect::new(0, 0, 2000, 2500)]);
}

#[test]
fn test_scenario_two_columns() {
    let limit = PosterOptions::default().page_limit().unwrap();
    let rects = partition(PixelSize::new(4500, 3000), limit).unwrap();
    assert_eq!(
        rects,
        vec![
            PixelRect::new(0, 0, 2250, 3000),
            PixelRect::new(2250, 0, 4500, 3000),
        ]
    );
}

#[test]
fn test_scenario_two_by_two() {
    let limit = PosterOptions::default().page_limit().unwrap();
    let rects = partition(PixelSize::new(3000, 4000), limit).unwrap();
    assert_eq!(
        rects,
        vec![
            PixelRect::new(0, 0, 2250, 3000),
            PixelRect::new(2250, 0, 3000, 3000),
            PixelRect::new(0, 3000, 2250, 4000),
            PixelRect::new(2250, 3000, 3000, 4000),
        ]
    );
}

#[test]
fn test_scenario_zero_dpi_rejected() {
    let image = create_test_image(10, 10);
    let options = PosterOptions {
        dpi: 0,
        ..Default::default()
    };

    assert!(matches!(
        tile_image(&image, &options),
        Err(PosterError::InvalidDpi(_))
    ));
    assert!(matches!(
        build_poster_sync(&image, &options),
        Err(PosterError::InvalidDpi(_))
    ));
}

// =============================================================================
// Tiles
// =============================================================================

#[test]
fn test_tiles_match_rects_and_source() {
    let image = create_test_image(500, 400);
    let options = options_30dpi();
    let tiles = tile_image(&image, &options).unwrap();

    // 225 x 300 limit: 3 columns x 2 rows
    assert_eq!(tiles.len(), 6);
    for (i, tile) in tiles.iter().enumerate() {
        assert_eq!(tile.index, i);
        assert_eq!(tile.image.width(), tile.rect.width());
        assert_eq!(tile.image.height(), tile.rect.height());

        let (w, h) = tile.image.dimensions();
        for (x, y, pixel) in tile.image.enumerate_pixels() {
            if is_border(x, y, w, h, options.border_px) {
                assert_eq!(*pixel, Rgba([0, 0, 0, 255]));
            } else {
                assert_eq!(pixel, image.get_pixel(tile.rect.min_x + x, tile.rect.min_y + y));
            }
        }
    }
    assert_eq!(tiles[2].rect, PixelRect::new(450, 0, 500, 300));
    assert_eq!(tiles[5].rect, PixelRect::new(450, 300, 500, 400));
}

#[test]
fn test_empty_image_rejected() {
    let image = RgbaImage::new(0, 40);
    assert!(matches!(
        tile_image(&image, &options_30dpi()),
        Err(PosterError::EmptyImage { .. })
    ));
}

#[test]
fn test_dynamic_image_source() {
    let image = DynamicImage::ImageRgba8(create_test_image(230, 100));
    let tiles = tile_image(&image, &options_30dpi()).unwrap();
    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles[1].rect, PixelRect::new(225, 0, 230, 100));
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn test_poster_pages_in_tile_order() {
    let image = create_test_image(500, 400);
    let options = options_30dpi();
    let poster = build_poster_sync(&image, &options).unwrap();

    assert_eq!(poster.rects.len(), 6);
    assert_eq!(poster.page_count(), 6);

    let bytes = pdf_bytes(poster.document).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), poster.rects.len());

    for ((_, &page_id), rect) in pages.iter().zip(poster.rects.iter()) {
        assert_eq!(media_box(&doc, page_id), vec![0.0, 0.0, 612.0, 792.0]);

        let image = page_image(&doc, page_id);
        assert_eq!(int(image, b"Width"), rect.width() as i64);
        assert_eq!(int(image, b"Height"), rect.height() as i64);

        // Printed at pixels / dpi inches, 72pt each, top-left at the half-inch margin
        let width_pt = rect.width() as f32 * 72.0 / 30.0;
        let height_pt = rect.height() as f32 * 72.0 / 30.0;
        let content = page_content(&doc, page_id);
        let expected = format!(
            "q {} 0 0 {} 36 {} cm",
            width_pt,
            height_pt,
            792.0 - 36.0 - height_pt
        );
        assert!(content.starts_with(&expected), "{} vs {}", content, expected);
    }
}

#[test]
fn test_page_image_data_matches_tile() {
    let image = create_test_image(120, 80);
    let poster = build_poster_sync(&image, &options_30dpi()).unwrap();
    assert_eq!(poster.page_count(), 1);

    let expected: Vec<u8> = poster.tiles[0]
        .image
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let bytes = pdf_bytes(poster.document).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let stream = page_image(&doc, page_id);

    assert_eq!(
        stream.dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
        b"DeviceRGB"
    );
    assert!(stream.dict.get(b"SMask").is_err());
    assert_eq!(stream_data(stream), expected);
}

#[test]
fn test_transparent_tile_gets_soft_mask() {
    let mut image = create_test_image(60, 60);
    image.put_pixel(30, 30, Rgba([10, 20, 30, 128]));
    let poster = build_poster_sync(&image, &options_30dpi()).unwrap();

    let bytes = pdf_bytes(poster.document).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let stream = page_image(&doc, page_id);

    let smask_id = stream.dict.get(b"SMask").unwrap().as_reference().unwrap();
    let smask = doc.get_object(smask_id).unwrap().as_stream().unwrap();
    assert_eq!(int(smask, b"Width"), 60);
    let alpha = stream_data(smask);
    assert_eq!(alpha[30 * 60 + 30], 128);
    assert_eq!(alpha[0], 255);
}

#[test]
fn test_poster_is_repeatable() {
    let image = create_test_image(300, 310);
    let options = options_30dpi();

    let first = build_poster_sync(&image, &options).unwrap();
    let second = build_poster_sync(&image, &options).unwrap();

    assert_eq!(first.rects, second.rects);
    assert_eq!(first.tiles, second.tiles);
}

#[test]
fn test_landscape_pages() {
    let image = create_test_image(320, 100);
    let options = PosterOptions {
        orientation: Orientation::Landscape,
        ..options_30dpi()
    };
    let poster = build_poster_sync(&image, &options).unwrap();
    // Landscape limit is 300 x 225
    assert_eq!(
        poster.rects,
        vec![PixelRect::new(0, 0, 300, 100), PixelRect::new(300, 0, 320, 100)]
    );

    let bytes = pdf_bytes(poster.document).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    for (_, page_id) in doc.get_pages() {
        assert_eq!(media_box(&doc, page_id), vec![0.0, 0.0, 792.0, 612.0]);
    }
}

// =============================================================================
// Custom sinks
// =============================================================================

/// Records placements instead of writing a document
#[derive(Default)]
struct RecordingSink {
    pages: Vec<(usize, PagePlacement)>,
}

impl DocumentSink for RecordingSink {
    type Output = Vec<(usize, PagePlacement)>;

    fn append_page(&mut self, tile: &Tile, placement: &PagePlacement) -> Result<()> {
        self.pages.push((tile.index, placement.clone()));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.pages)
    }
}

#[test]
fn test_compose_into_custom_sink() {
    let image = create_test_image(450, 300);
    let options = options_30dpi();
    let tiles = tile_image(&image, &options).unwrap();

    let pages = compose(&tiles, &options, RecordingSink::default()).unwrap();
    assert_eq!(pages.len(), 2);
    for (i, (tile_index, placement)) in pages.iter().enumerate() {
        assert_eq!(*tile_index, i);
        assert_eq!(placement.tile_index, i);
        assert_eq!(placement.width_in, 7.5);
        assert_eq!(placement.height_in, 10.0);
    }
}

#[test]
fn test_compose_rejects_invalid_dpi() {
    let image = create_test_image(20, 20);
    let tiles = tile_image(&image, &options_30dpi()).unwrap();
    let options = PosterOptions {
        dpi: 0,
        ..Default::default()
    };
    let result = compose(&tiles, &options, RecordingSink::default());
    assert!(matches!(result, Err(PosterError::InvalidDpi(_))));
}

// =============================================================================
// Async I/O
// =============================================================================

fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[tokio::test]
async fn test_load_build_and_save() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("poster.png");
    let output = dir.path().join("Output.pdf");
    std::fs::write(&input, encode_png(&create_test_image(460, 310))).unwrap();

    let image = load_image(&input).await.unwrap();
    assert_eq!((image.width(), image.height()), (460, 310));

    let poster = build_poster(image, &options_30dpi()).await.unwrap();
    // 3 columns (225, 225, 10) x 2 rows (300, 10)
    assert_eq!(poster.page_count(), 6);

    save_pdf(poster.document, &output).await.unwrap();
    let loaded = Document::load(&output).unwrap();
    assert_eq!(loaded.get_pages().len(), 6);
}

#[tokio::test]
async fn test_read_dimensions_from_header() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("poster.png");
    std::fs::write(&input, encode_png(&create_test_image(460, 310))).unwrap();
    assert_eq!(read_dimensions(&input).await.unwrap(), PixelSize::new(460, 310));

    // No extension: format comes from the file signature
    let bare = dir.path().join("upload");
    std::fs::write(&bare, encode_png(&create_test_image(123, 45))).unwrap();
    assert_eq!(read_dimensions(&bare).await.unwrap(), PixelSize::new(123, 45));

    let missing = read_dimensions(dir.path().join("missing.png")).await;
    assert!(matches!(missing, Err(PosterError::Io(_))));
}

#[tokio::test]
async fn test_build_from_bytes_source() {
    let bytes = encode_png(&create_test_image(100, 301));
    let source = ImageBytes::new("upload.png", bytes);
    assert_eq!(source.label(), "upload.png");

    let poster = build_poster_from(source, &options_30dpi()).await.unwrap();
    assert_eq!(
        poster.rects,
        vec![PixelRect::new(0, 0, 100, 300), PixelRect::new(0, 300, 100, 301)]
    );
}

#[tokio::test]
async fn test_build_from_missing_file() {
    let source = ImageFile::new("/definitely/not/here.png");
    let result = build_poster_from(source, &options_30dpi()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_build_from_rejects_zero_dpi_before_decoding() {
    let source = ImageBytes::new("garbage", b"not an image".to_vec());
    let options = PosterOptions {
        dpi: 0,
        ..Default::default()
    };
    let result = build_poster_from(source, &options).await;
    assert!(matches!(result, Err(PosterError::InvalidDpi(_))));
}

#[tokio::test]
async fn test_export_tiles() {
    use tempfile::TempDir;

    let image = create_test_image(250, 50);
    let tiles = tile_image(&image, &options_30dpi()).unwrap();
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("parts");

    let written = export_tiles(&tiles, &out_dir, "art.png").await.unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], out_dir.join("art.png-part-0.png"));
    assert_eq!(written[1], out_dir.join("art.png-part-1.png"));

    let reloaded = load_image(&written[1]).await.unwrap().to_rgba8();
    assert_eq!(reloaded, tiles[1].image);
}
