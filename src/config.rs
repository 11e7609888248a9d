use egui::{Color32, Rect, pos2, vec2};

/// Key under which the archive lives in eframe's storage.
pub const ARCHIVE_KEY: &str = "sketch.archive";

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 8.0;
pub const ZOOM_STEP: f32 = 1.2;

/// Squared world distance a pointer has to travel before a new segment is emitted.
pub const MIN_SEGMENT_DISTANCE_SQ: f32 = 0.25;

pub const DEFAULT_PEN_SIZE: f32 = 3.0;
pub const DEFAULT_ERASER_SIZE: f32 = 24.0;
pub const PEN_SIZE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=50.0;
pub const ERASER_SIZE_RANGE: std::ops::RangeInclusive<f32> = 4.0..=100.0;

pub const DEFAULT_INK_COLOR: Color32 = Color32::from_rgb(20, 20, 20);
pub const DEFAULT_BACKGROUND_COLOR: Color32 = Color32::from_rgb(250, 249, 245);

/// Padding added around the content box when exporting.
pub const EXPORT_PADDING: f32 = 20.0;
/// Largest width or height an export may have, in pixels.
pub const MAX_EXPORT_DIMENSION: u32 = 8192;

/// Region exported when nothing has been drawn yet.
pub fn default_canvas_rect() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(1024.0, 768.0))
}

pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [480.0, 320.0];
