use egui::{Color32, CursorIcon, Key, Painter, PointerButton, Pos2, Rect, Sense, Stroke, Ui};

use crate::input::{InputEvent, InputHandler};
use crate::model::SketchModel;
use crate::tool_state::InteractionMode;

/// What the current pointer drag is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Stroke,
    Pan { last: Pos2 },
}

/// The infinite canvas: routes input into the model and paints it.
#[derive(Debug)]
pub struct CanvasView {
    input: InputHandler,
    hover_pos: Option<Pos2>,
    drag: Option<Drag>,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            input: InputHandler::new(Rect::NOTHING),
            hover_pos: None,
            drag: None,
        }
    }
}

impl CanvasView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_pos(&self) -> Option<Pos2> {
        self.hover_pos
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.drag, Some(Drag::Pan { .. }))
    }

    /// Handle this frame's input and paint the canvas into all remaining space.
    pub fn show(&mut self, ui: &mut Ui, model: &mut SketchModel) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        self.input.set_canvas_rect(rect);
        for event in self.input.process_input(ui.ctx()) {
            self.route_event(model, &event);
        }

        self.paint(&painter, rect, model);

        if response.hovered() || self.drag.is_some() {
            ui.ctx().set_cursor_icon(self.cursor_icon(model));
        }
    }

    /// Apply one input event to the model.
    pub fn route_event(&mut self, model: &mut SketchModel, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { location, button } => {
                if !event.is_in_canvas() {
                    return;
                }
                let pan = *button == PointerButton::Middle
                    || (*button == PointerButton::Primary && model.mode() == InteractionMode::Pan);
                if pan {
                    model.begin_pan();
                    self.drag = Some(Drag::Pan {
                        last: location.position,
                    });
                } else if *button == PointerButton::Primary && model.is_drawing_active() {
                    model.begin_stroke(location.position);
                    self.drag = Some(Drag::Stroke);
                }
            }
            InputEvent::PointerMove { location, .. } => {
                let in_canvas = event.is_in_canvas();
                self.hover_pos = in_canvas.then_some(location.position);
                match self.drag {
                    Some(Drag::Pan { last }) => {
                        model.pan_by(location.position - last);
                        self.drag = Some(Drag::Pan {
                            last: location.position,
                        });
                    }
                    // no ink outside the canvas; the stroke resumes once the pointer is back
                    Some(Drag::Stroke) if !in_canvas => model.pointer_exited(),
                    Some(Drag::Stroke) => {
                        model.pointer_moved(location.position);
                    }
                    None => {}
                }
            }
            InputEvent::PointerUp { .. } => self.end_drag(model),
            InputEvent::PointerLeave { .. } => {
                self.hover_pos = None;
                model.pointer_exited();
            }
            InputEvent::Scroll { delta, .. } => {
                if event.is_in_canvas() {
                    model.pan_by(*delta);
                }
            }
            InputEvent::Zoom { location, factor } => {
                if event.is_in_canvas() {
                    model.zoom_at(location.position, *factor);
                }
            }
            InputEvent::KeyDown { key, modifiers } => self.handle_shortcut(model, *key, *modifiers),
            InputEvent::KeyUp { key: Key::Space, .. } => {
                model.set_space_pan_active(false);
                if self.is_panning() && !model.tools().hand_tool() {
                    self.end_drag(model);
                }
            }
            InputEvent::KeyUp { .. } => {}
        }
    }

    fn end_drag(&mut self, model: &mut SketchModel) {
        match self.drag.take() {
            Some(Drag::Pan { .. }) => model.end_pan(),
            Some(Drag::Stroke) => model.end_stroke(),
            None => {}
        }
    }

    fn handle_shortcut(&mut self, model: &mut SketchModel, key: Key, modifiers: egui::Modifiers) {
        if modifiers.command {
            match key {
                Key::Plus | Key::Equals => model.zoom_in(),
                Key::Minus => model.zoom_out(),
                Key::Num0 => model.reset_view(),
                Key::Backspace => model.clear(),
                _ => {}
            }
            return;
        }

        match key {
            Key::Space => {
                if self.drag == Some(Drag::Stroke) {
                    self.end_drag(model);
                }
                model.set_space_pan_active(true);
            }
            Key::B => model.select_pen(),
            Key::E => model.set_erasing(!model.tools().erasing()),
            Key::H => model.set_hand_tool(!model.tools().hand_tool()),
            _ => {}
        }
    }

    fn cursor_icon(&self, model: &SketchModel) -> CursorIcon {
        match model.mode() {
            InteractionMode::Pan if self.is_panning() => CursorIcon::Grabbing,
            InteractionMode::Pan => CursorIcon::Grab,
            InteractionMode::Draw | InteractionMode::Erase => CursorIcon::Crosshair,
            InteractionMode::Idle => CursorIcon::Default,
        }
    }

    /// Paint background, visible segments and the eraser preview into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect, model: &SketchModel) {
        let background = model.background_color();
        painter.rect_filled(rect, 0.0, background);

        let transform = model.transform();
        let scale = transform.scale();
        let visible = transform.visible_world_rect(rect.size());
        let to_screen = |world: Pos2| rect.min + transform.view_point(world).to_vec2();

        for segment in model.document().visible_segments(visible) {
            let color = segment.paint_color(background);
            let width = segment.width() * scale;
            let start = to_screen(segment.start());
            let end = to_screen(segment.end());
            painter.line_segment([start, end], Stroke::new(width, color));
            // round caps
            if width > 2.0 {
                painter.circle_filled(start, width / 2.0, color);
                painter.circle_filled(end, width / 2.0, color);
            }
        }

        if model.mode() == InteractionMode::Erase {
            if let Some(hover) = self.hover_pos {
                painter.circle_stroke(
                    rect.min + hover.to_vec2(),
                    model.eraser_size() / 2.0,
                    Stroke::new(1.0, preview_color(background)),
                );
            }
        }
    }
}

/// A grey that stays visible on top of `background`.
fn preview_color(background: Color32) -> Color32 {
    let luminance =
        0.299 * background.r() as f32 + 0.587 * background.g() as f32 + 0.114 * background.b() as f32;
    if luminance > 128.0 {
        Color32::from_gray(60)
    } else {
        Color32::from_gray(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::{Modifiers, pos2, vec2};

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: pos2(x, y),
            is_in_canvas: true,
        }
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    fn drag(canvas: &mut CanvasView, model: &mut SketchModel, from: Pos2, to: Pos2) {
        canvas.route_event(model, &InputEvent::PointerDown {
            location: at(from.x, from.y),
            button: PointerButton::Primary,
        });
        canvas.route_event(model, &InputEvent::PointerMove {
            location: at(to.x, to.y),
            held_buttons: vec![PointerButton::Primary],
        });
        canvas.route_event(model, &InputEvent::PointerUp {
            location: at(to.x, to.y),
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn primary_drag_draws() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        drag(&mut canvas, &mut model, pos2(10.0, 10.0), pos2(60.0, 10.0));
        assert_eq!(model.document().len(), 1);
        assert_eq!(model.last_world_point(), None);
    }

    #[test]
    fn hovering_does_not_draw() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        canvas.route_event(&mut model, &InputEvent::PointerMove {
            location: at(10.0, 10.0),
            held_buttons: vec![],
        });
        canvas.route_event(&mut model, &InputEvent::PointerMove {
            location: at(80.0, 10.0),
            held_buttons: vec![],
        });
        assert!(model.document().is_empty());
        assert_eq!(canvas.hover_pos(), Some(pos2(80.0, 10.0)));
    }

    #[test]
    fn space_drag_pans_instead_of_drawing() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        canvas.route_event(&mut model, &key(Key::Space));
        drag(&mut canvas, &mut model, pos2(100.0, 100.0), pos2(80.0, 90.0));

        assert!(model.document().is_empty());
        assert_eq!(model.transform().offset(), vec2(20.0, 10.0));

        canvas.route_event(&mut model, &InputEvent::KeyUp {
            key: Key::Space,
            modifiers: Modifiers::NONE,
        });
        assert_eq!(model.mode(), InteractionMode::Draw);
    }

    #[test]
    fn shortcuts_switch_tools() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();

        canvas.route_event(&mut model, &key(Key::E));
        assert_eq!(model.mode(), InteractionMode::Erase);
        canvas.route_event(&mut model, &key(Key::H));
        assert_eq!(model.mode(), InteractionMode::Pan);
        assert!(!model.tools().erasing());
        canvas.route_event(&mut model, &key(Key::B));
        assert_eq!(model.mode(), InteractionMode::Draw);
    }

    #[test]
    fn command_shortcuts_zoom_and_clear() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        drag(&mut canvas, &mut model, pos2(0.0, 0.0), pos2(30.0, 0.0));
        let _ = model.take_pending_archive();

        let command = |key| InputEvent::KeyDown {
            key,
            modifiers: Modifiers::COMMAND,
        };
        canvas.route_event(&mut model, &command(Key::Plus));
        assert!((model.transform().scale() - 1.2).abs() < 1e-6);
        canvas.route_event(&mut model, &command(Key::Num0));
        assert_eq!(model.transform().scale(), 1.0);

        canvas.route_event(&mut model, &command(Key::Backspace));
        assert!(model.document().is_empty());
        assert!(model.take_pending_archive().unwrap().segments.is_empty());
    }

    #[test]
    fn leaving_clears_hover_and_last_point() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        canvas.route_event(&mut model, &InputEvent::PointerDown {
            location: at(5.0, 5.0),
            button: PointerButton::Primary,
        });
        canvas.route_event(&mut model, &InputEvent::PointerLeave {
            last_known_location: at(5.0, 5.0),
        });
        assert_eq!(canvas.hover_pos(), None);
        assert_eq!(model.last_world_point(), None);
    }

    #[test]
    fn leaving_the_canvas_mid_stroke_stops_ink() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        let outside = |x: f32| InputLocation {
            position: pos2(x, 10.0),
            is_in_canvas: false,
        };

        canvas.route_event(&mut model, &InputEvent::PointerDown {
            location: at(10.0, 10.0),
            button: PointerButton::Primary,
        });
        for x in [-50.0, -150.0] {
            canvas.route_event(&mut model, &InputEvent::PointerMove {
                location: outside(x),
                held_buttons: vec![PointerButton::Primary],
            });
        }
        assert!(model.document().is_empty());
        assert_eq!(model.last_world_point(), None);
        assert_eq!(canvas.hover_pos(), None);

        // back inside: the first move only re-anchors, the next one draws
        canvas.route_event(&mut model, &InputEvent::PointerMove {
            location: at(20.0, 40.0),
            held_buttons: vec![PointerButton::Primary],
        });
        assert!(model.document().is_empty());
        canvas.route_event(&mut model, &InputEvent::PointerMove {
            location: at(60.0, 40.0),
            held_buttons: vec![PointerButton::Primary],
        });
        assert_eq!(model.document().len(), 1);
        assert_eq!(model.document().segments()[0].start(), pos2(20.0, 40.0));
    }

    #[test]
    fn presses_outside_the_canvas_are_ignored() {
        let mut canvas = CanvasView::new();
        let mut model = SketchModel::new();
        canvas.route_event(&mut model, &InputEvent::PointerDown {
            location: InputLocation {
                position: pos2(30.0, 30.0),
                is_in_canvas: false,
            },
            button: PointerButton::Primary,
        });
        canvas.route_event(&mut model, &InputEvent::PointerMove {
            location: at(80.0, 30.0),
            held_buttons: vec![PointerButton::Primary],
        });
        assert!(model.document().is_empty());
        assert_eq!(model.last_world_point(), None);
    }

    #[test]
    fn cursor_is_crosshair_for_draw_and_erase() {
        let canvas = CanvasView::new();
        let mut model = SketchModel::new();
        assert_eq!(canvas.cursor_icon(&model), CursorIcon::Crosshair);
        model.set_erasing(true);
        assert_eq!(canvas.cursor_icon(&model), CursorIcon::Crosshair);
        model.set_hand_tool(true);
        assert_eq!(canvas.cursor_icon(&model), CursorIcon::Grab);
    }

    #[test]
    fn preview_contrasts_with_background() {
        assert_eq!(preview_color(Color32::WHITE), Color32::from_gray(60));
        assert_eq!(preview_color(Color32::BLACK), Color32::from_gray(200));
    }
}
