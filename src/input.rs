use egui::{Context, InputState, Key, Modifiers, Order, PointerButton, Pos2, Rect, Vec2};

/// Where an input event happened, in canvas (view) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas' top-left corner
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Canvas-level input, distilled from a frame's raw egui input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Pointer moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        held_buttons: Vec<PointerButton>,
    },
    /// Pointer left the window
    PointerLeave {
        last_known_location: InputLocation,
    },
    /// Plain scroll, in view points
    Scroll {
        location: InputLocation,
        delta: Vec2,
    },
    /// Pinch or modifier+scroll zoom; `factor` multiplies the scale
    Zoom {
        location: InputLocation,
        factor: f32,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::Scroll { location, .. }
            | InputEvent::Zoom { location, .. } => location.is_in_canvas,
            InputEvent::PointerLeave {
                last_known_location,
            } => last_known_location.is_in_canvas,
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => false,
        }
    }
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Converts raw egui input into [`InputEvent`]s for the canvas.
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    /// A popup or window is under the pointer
    pointer_covered: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            pointer_covered: false,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: (screen_pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: !self.pointer_covered && self.canvas_rect.contains(screen_pos),
        }
    }

    /// Collect this frame's events. Keyboard events are skipped while a
    /// widget (e.g. a colour hex field) has keyboard focus, and pointer
    /// events count as outside the canvas while an area such as a colour
    /// picker popup lies over it.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let keyboard_taken = ctx.wants_keyboard_input();
        let pointer_covered = ctx
            .input(|input| input.pointer.latest_pos())
            .and_then(|pos| ctx.layer_id_at(pos))
            .is_some_and(|layer| layer.order != Order::Background);
        ctx.input(|input| self.collect(input, keyboard_taken, pointer_covered))
    }

    fn collect(
        &mut self,
        input: &InputState,
        keyboard_taken: bool,
        pointer_covered: bool,
    ) -> Vec<InputEvent> {
        self.pointer_covered = pointer_covered;
        let mut events = Vec::new();

        let hover_pos = input.pointer.hover_pos();
        if let Some(pos) = hover_pos {
            if Some(pos) != self.last_pointer_pos {
                let held_buttons = BUTTONS
                    .into_iter()
                    .filter(|button| input.pointer.button_down(*button))
                    .collect();
                events.push(InputEvent::PointerMove {
                    location: self.make_location(pos),
                    held_buttons,
                });
            }
        } else if let Some(last) = self.last_pointer_pos {
            events.push(InputEvent::PointerLeave {
                last_known_location: self.make_location(last),
            });
        }
        self.last_pointer_pos = hover_pos;

        if let Some(pos) = input.pointer.interact_pos().or(hover_pos) {
            for button in BUTTONS {
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                        button,
                    });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                        button,
                    });
                }
            }
        }

        if let Some(pos) = hover_pos {
            let zoom = input.zoom_delta();
            if zoom != 1.0 {
                events.push(InputEvent::Zoom {
                    location: self.make_location(pos),
                    factor: zoom,
                });
            }
            let scroll = input.smooth_scroll_delta;
            if scroll != Vec2::ZERO {
                events.push(InputEvent::Scroll {
                    location: self.make_location(pos),
                    delta: scroll,
                });
            }
        }

        if !keyboard_taken {
            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                {
                    events.push(if *pressed {
                        InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        }
                    } else {
                        InputEvent::KeyUp {
                            key: *key,
                            modifiers: *modifiers,
                        }
                    });
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{RawInput, pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), vec2(400.0, 300.0))
    }

    fn run_frame(handler: &mut InputHandler, events: Vec<egui::Event>) -> Vec<InputEvent> {
        let ctx = Context::default();
        let raw = RawInput {
            events,
            ..Default::default()
        };
        let mut collected = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            collected = handler.process_input(ctx);
        });
        collected
    }

    #[test]
    fn positions_are_relative_to_canvas() {
        let handler = InputHandler::new(canvas());
        let location = handler.make_location(pos2(150.0, 60.0));
        assert_eq!(location.position, pos2(50.0, 10.0));
        assert!(location.is_in_canvas);
        assert!(!handler.make_location(pos2(10.0, 10.0)).is_in_canvas);
    }

    #[test]
    fn pointer_move_is_reported() {
        let mut handler = InputHandler::new(canvas());
        let events = run_frame(&mut handler, vec![egui::Event::PointerMoved(pos2(200.0, 100.0))]);
        assert!(events.iter().any(|event| matches!(
            event,
            InputEvent::PointerMove { location, .. } if location.position == pos2(100.0, 50.0)
        )));
    }

    #[test]
    fn covered_pointer_is_outside_canvas() {
        let mut handler = InputHandler::new(canvas());
        let ctx = Context::default();
        let raw = RawInput {
            events: vec![
                egui::Event::PointerMoved(pos2(200.0, 100.0)),
                egui::Event::PointerButton {
                    pos: pos2(200.0, 100.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ],
            ..Default::default()
        };
        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            events = ctx.input(|input| handler.collect(input, false, true));
        });

        assert!(events.iter().any(|event| matches!(event, InputEvent::PointerDown { .. })));
        assert!(events.iter().all(|event| !event.is_in_canvas()));
    }

    #[test]
    fn key_presses_are_reported() {
        let mut handler = InputHandler::new(canvas());
        let events = run_frame(
            &mut handler,
            vec![egui::Event::Key {
                key: Key::Space,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::NONE,
            }],
        );
        assert!(events.contains(&InputEvent::KeyDown {
            key: Key::Space,
            modifiers: Modifiers::NONE,
        }));
    }
}
