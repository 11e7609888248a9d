use egui::{Color32, Pos2, Rect, Vec2};

use crate::config::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_ERASER_SIZE, DEFAULT_INK_COLOR, DEFAULT_PEN_SIZE,
    ERASER_SIZE_RANGE, MIN_SEGMENT_DISTANCE_SQ, PEN_SIZE_RANGE,
};
use crate::document::Document;
use crate::persistence::Archive;
use crate::stroke::LineSegment;
use crate::tool_state::{InteractionMode, ToolState};
use crate::transform::ViewTransform;

/// State behind the canvas: tools, colours, view transform and the drawing.
///
/// Every mutating action that should survive a restart marks the archive
/// dirty; the app collects it with [`SketchModel::take_pending_archive`] and
/// writes it to storage. Pan and zoom are view state and never do.
#[derive(Debug, Clone)]
pub struct SketchModel {
    tools: ToolState,
    pen_size: f32,
    eraser_size: f32,
    ink_color: Color32,
    background_color: Color32,
    transform: ViewTransform,
    document: Document,
    last_world_point: Option<Pos2>,
    archive_dirty: bool,
}

impl Default for SketchModel {
    fn default() -> Self {
        Self {
            tools: ToolState::default(),
            pen_size: DEFAULT_PEN_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
            ink_color: DEFAULT_INK_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            transform: ViewTransform::default(),
            document: Document::new(),
            last_world_point: None,
            archive_dirty: false,
        }
    }
}

impl SketchModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_archive(archive: Archive) -> Self {
        Self {
            pen_size: archive.pen_size.clamp(*PEN_SIZE_RANGE.start(), *PEN_SIZE_RANGE.end()),
            eraser_size: archive
                .eraser_size
                .clamp(*ERASER_SIZE_RANGE.start(), *ERASER_SIZE_RANGE.end()),
            ink_color: archive.ink_color,
            background_color: archive.background_color,
            document: Document::from_segments(archive.segments),
            ..Self::default()
        }
    }

    pub fn to_archive(&self) -> Archive {
        Archive {
            segments: self.document.segments().to_vec(),
            ink_color: self.ink_color,
            background_color: self.background_color,
            pen_size: self.pen_size,
            eraser_size: self.eraser_size,
        }
    }

    /// Returns a fresh archive if anything persistent changed since the last call.
    pub fn take_pending_archive(&mut self) -> Option<Archive> {
        if std::mem::take(&mut self.archive_dirty) {
            Some(self.to_archive())
        } else {
            None
        }
    }

    fn mark_dirty(&mut self) {
        self.archive_dirty = true;
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn mode(&self) -> InteractionMode {
        self.tools.mode()
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn pen_size(&self) -> f32 {
        self.pen_size
    }

    pub fn eraser_size(&self) -> f32 {
        self.eraser_size
    }

    pub fn ink_color(&self) -> Color32 {
        self.ink_color
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn last_world_point(&self) -> Option<Pos2> {
        self.last_world_point
    }

    // Tool flags

    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.tools.set_drawing_enabled(enabled);
        if !enabled {
            self.last_world_point = None;
        }
        log::debug!("Drawing enabled: {enabled}");
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.tools.set_erasing(erasing);
        log::debug!("Eraser: {erasing}");
    }

    pub fn set_hand_tool(&mut self, hand_tool: bool) {
        self.tools.set_hand_tool(hand_tool);
        if hand_tool {
            self.last_world_point = None;
        }
        log::debug!("Hand tool: {hand_tool}");
    }

    pub fn select_pen(&mut self) {
        self.tools.select_pen();
        log::debug!("Pen selected");
    }

    pub fn set_space_pan_active(&mut self, active: bool) {
        if self.tools.space_pan_active() == active {
            return;
        }
        self.tools.set_space_pan_active(active);
        if active {
            self.last_world_point = None;
        }
    }

    // Settings

    pub fn set_pen_size(&mut self, size: f32) {
        let size = size.clamp(*PEN_SIZE_RANGE.start(), *PEN_SIZE_RANGE.end());
        if size != self.pen_size {
            self.pen_size = size;
            self.mark_dirty();
        }
    }

    pub fn set_eraser_size(&mut self, size: f32) {
        let size = size.clamp(*ERASER_SIZE_RANGE.start(), *ERASER_SIZE_RANGE.end());
        if size != self.eraser_size {
            self.eraser_size = size;
            self.mark_dirty();
        }
    }

    pub fn set_ink_color(&mut self, color: Color32) {
        if color != self.ink_color {
            self.ink_color = color;
            self.mark_dirty();
        }
    }

    pub fn set_background_color(&mut self, color: Color32) {
        if color != self.background_color {
            self.background_color = color;
            self.mark_dirty();
        }
    }

    // Strokes

    pub fn world_point(&self, view: Pos2) -> Pos2 {
        self.transform.world_point(view)
    }

    pub fn view_point(&self, world: Pos2) -> Pos2 {
        self.transform.view_point(world)
    }

    /// True when pointer movement currently lays down ink or eraser strokes.
    pub fn is_drawing_active(&self) -> bool {
        matches!(self.mode(), InteractionMode::Draw | InteractionMode::Erase)
    }

    /// Start a stroke at `view_pos`. Does nothing unless drawing is active.
    pub fn begin_stroke(&mut self, view_pos: Pos2) {
        if self.is_drawing_active() {
            self.last_world_point = Some(self.world_point(view_pos));
        }
    }

    /// Extend the current stroke to `view_pos`, returning the new segment if
    /// the pointer moved far enough.
    pub fn pointer_moved(&mut self, view_pos: Pos2) -> Option<&LineSegment> {
        if !self.is_drawing_active() {
            return None;
        }
        let world = self.world_point(view_pos);
        let previous = self.last_world_point.replace(world);
        let last = previous.filter(|last| (world - *last).length_sq() > MIN_SEGMENT_DISTANCE_SQ)?;

        let scale = self.transform.scale();
        let segment = if self.tools.erasing() {
            LineSegment::new_eraser(last, world, self.eraser_size / scale)
        } else {
            LineSegment::new(last, world, self.ink_color, self.pen_size / scale)
        };
        self.document.push(segment);
        self.mark_dirty();
        self.document.segments().last()
    }

    pub fn end_stroke(&mut self) {
        self.last_world_point = None;
    }

    pub fn pointer_exited(&mut self) {
        self.last_world_point = None;
    }

    pub fn clear(&mut self) {
        self.document.clear();
        self.last_world_point = None;
        self.mark_dirty();
        log::info!("Canvas cleared");
    }

    // View

    pub fn begin_pan(&mut self) {
        self.tools.set_panning(true);
    }

    pub fn end_pan(&mut self) {
        self.tools.set_panning(false);
    }

    pub fn pan_by(&mut self, view_delta: Vec2) {
        self.transform.pan_by(view_delta);
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        self.transform.zoom_at(anchor, factor);
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
    }

    /// Bounding box of the drawing in world space.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.document.bounding_box()
    }
}
