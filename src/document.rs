use egui::Rect;
use serde::{Deserialize, Serialize};

use crate::stroke::LineSegment;

/// Ordered, append-only list of segments drawn during the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    segments: Vec<LineSegment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Union of every segment's rect, or `None` when nothing has been drawn.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.segments
            .iter()
            .map(LineSegment::rect)
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Segments whose rect intersects `world_rect`, in drawing order.
    pub fn visible_segments(&self, world_rect: Rect) -> impl Iterator<Item = &LineSegment> {
        self.segments
            .iter()
            .filter(move |segment| segment.rect().intersects(world_rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn empty_document_has_no_bounds() {
        assert_eq!(Document::new().bounding_box(), None);
    }

    #[test]
    fn bounds_cover_all_segments() {
        let mut document = Document::new();
        document.push(LineSegment::new(pos2(0.0, 0.0), pos2(10.0, 10.0), Color32::BLACK, 2.0));
        document.push(LineSegment::new(pos2(50.0, -20.0), pos2(60.0, 5.0), Color32::BLACK, 2.0));

        let bounds = document.bounding_box().unwrap();
        assert_eq!(bounds.min, pos2(-1.0, -21.0));
        assert_eq!(bounds.max, pos2(61.0, 11.0));
    }

    #[test]
    fn clear_removes_everything() {
        let mut document = Document::new();
        document.push(LineSegment::new(pos2(0.0, 0.0), pos2(1.0, 1.0), Color32::BLACK, 1.0));
        document.clear();
        assert!(document.is_empty());
    }

    #[test]
    fn culls_offscreen_segments() {
        let mut document = Document::new();
        document.push(LineSegment::new(pos2(0.0, 0.0), pos2(10.0, 0.0), Color32::BLACK, 1.0));
        document.push(LineSegment::new(pos2(500.0, 500.0), pos2(510.0, 500.0), Color32::BLACK, 1.0));

        let view = Rect::from_min_max(pos2(-5.0, -5.0), pos2(100.0, 100.0));
        assert_eq!(document.visible_segments(view).count(), 1);
    }
}
