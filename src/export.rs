use std::io::Cursor;
use std::path::Path;

use egui::{Color32, Pos2, Rect};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::config::{EXPORT_PADDING, MAX_EXPORT_DIMENSION, default_canvas_rect};
use crate::document::Document;
use crate::error::{ExportError, ExportResult};
use crate::stroke::LineSegment;

/// World-space region an export covers: the content box, or the default
/// canvas when nothing has been drawn, grown by [`EXPORT_PADDING`].
pub fn export_bounds(document: &Document) -> Rect {
    document
        .bounding_box()
        .unwrap_or_else(default_canvas_rect)
        .expand(EXPORT_PADDING)
}

/// Pixel size of an export covering `bounds` at one pixel per world unit.
pub fn export_size(bounds: Rect) -> ExportResult<(u32, u32)> {
    if !bounds.is_finite() || !bounds.is_positive() {
        return Err(ExportError::EmptyBounds);
    }
    let width = bounds.width().ceil() as u32;
    let height = bounds.height().ceil() as u32;
    if width > MAX_EXPORT_DIMENSION || height > MAX_EXPORT_DIMENSION {
        return Err(ExportError::TooLarge {
            width,
            height,
            max: MAX_EXPORT_DIMENSION,
        });
    }
    Ok((width.max(1), height.max(1)))
}

/// Render the background and every segment into an RGBA buffer.
pub fn rasterize(document: &Document, background: Color32) -> ExportResult<RgbaImage> {
    let bounds = export_bounds(document);
    let (width, height) = export_size(bounds)?;

    let mut image = RgbaImage::from_pixel(width, height, Rgba(background.to_srgba_unmultiplied()));
    for segment in document.segments() {
        draw_segment(&mut image, bounds.min, segment, segment.paint_color(background));
    }
    Ok(image)
}

/// Paint a round-capped segment with coverage anti-aliasing.
fn draw_segment(image: &mut RgbaImage, origin: Pos2, segment: &LineSegment, color: Color32) {
    let radius = (segment.width() / 2.0).max(0.5);
    let rect = segment.rect().expand(1.0);

    let x0 = ((rect.min.x - origin.x).floor().max(0.0)) as u32;
    let y0 = ((rect.min.y - origin.y).floor().max(0.0)) as u32;
    let x1 = ((rect.max.x - origin.x).ceil().max(0.0) as u32).min(image.width());
    let y1 = ((rect.max.y - origin.y).ceil().max(0.0) as u32).min(image.height());

    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let color_alpha = a as f32 / 255.0;

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Pos2::new(origin.x + x as f32 + 0.5, origin.y + y as f32 + 0.5);
            let coverage = (radius + 0.5 - segment.distance_to(center)).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let alpha = coverage * color_alpha;
            let pixel = image.get_pixel_mut(x, y);
            let Rgba([dr, dg, db, da]) = *pixel;
            *pixel = Rgba([
                blend(r, dr, alpha),
                blend(g, dg, alpha),
                blend(b, db, alpha),
                da.max((alpha * 255.0).round() as u8),
            ]);
        }
    }
}

fn blend(src: u8, dst: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
}

pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Rasterize the document and write it as a PNG to `path`.
/// Returns the exported image size.
pub fn export_png(document: &Document, background: Color32, path: &Path) -> ExportResult<(u32, u32)> {
    let image = rasterize(document, background)?;
    let bytes = encode_png(&image)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "Exported {}x{} PNG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image.dimensions())
}
