use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry;

/// One straight ink stroke between two world points.
///
/// Segments are immutable once created; the document only ever appends or
/// clears them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    id: Uuid,
    start: Pos2,
    end: Pos2,
    color: Color32,
    /// Width in world units.
    width: f32,
    /// Eraser segments are painted in whatever the background colour currently is.
    #[serde(default)]
    eraser: bool,
}

impl LineSegment {
    pub fn new(start: Pos2, end: Pos2, color: Color32, width: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            width,
            eraser: false,
        }
    }

    pub fn new_eraser(start: Pos2, end: Pos2, width: f32) -> Self {
        Self {
            eraser: true,
            ..Self::new(start, end, Color32::TRANSPARENT, width)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    /// Colour this segment is painted with against `background`.
    pub fn paint_color(&self, background: Color32) -> Color32 {
        if self.eraser { background } else { self.color }
    }

    /// Bounding box including the stroke's half-width.
    pub fn rect(&self) -> Rect {
        geometry::calculate_bounds(&[self.start, self.end], self.width / 2.0)
    }

    /// Distance from `point` to the segment's centre line.
    pub fn distance_to(&self, point: Pos2) -> f32 {
        geometry::distance_to_line_segment(point, self.start, self.end)
    }
}
