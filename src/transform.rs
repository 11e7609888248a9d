use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};

/// Maps between view space (points relative to the canvas rect) and world space.
///
/// `world = view / scale + offset`, so `offset` is the world point shown at the
/// canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn new(scale: f32, offset: Vec2) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            offset,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn world_point(&self, view: Pos2) -> Pos2 {
        Pos2::new(
            view.x / self.scale + self.offset.x,
            view.y / self.scale + self.offset.y,
        )
    }

    pub fn view_point(&self, world: Pos2) -> Pos2 {
        Pos2::new(
            (world.x - self.offset.x) * self.scale,
            (world.y - self.offset.y) * self.scale,
        )
    }

    /// Pan by a delta measured in view space.
    pub fn pan_by(&mut self, view_delta: Vec2) {
        self.offset -= view_delta / self.scale;
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Multiply the scale by `factor` while keeping the world point under
    /// `anchor` (view space) where it is.
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f32::EPSILON {
            return;
        }
        let world_anchor = self.world_point(anchor);
        self.scale = new_scale;
        self.offset = world_anchor.to_vec2() - anchor.to_vec2() / new_scale;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World-space rectangle visible through a canvas of `view_size`.
    pub fn visible_world_rect(&self, view_size: Vec2) -> Rect {
        Rect::from_two_pos(
            self.world_point(Pos2::ZERO),
            self.world_point(view_size.to_pos2()),
        )
    }
}
