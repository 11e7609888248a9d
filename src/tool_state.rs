/// What a primary-button drag on the canvas does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Draw,
    Erase,
    Pan,
}

/// Tool mode flags.
///
/// Setters keep the flags consistent: the eraser implies drawing, and the hand
/// tool and drawing/erasing switch each other off. Space-pan is a temporary
/// override that leaves the other flags alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    drawing_enabled: bool,
    erasing: bool,
    hand_tool: bool,
    space_pan_active: bool,
    panning: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            drawing_enabled: true,
            erasing: false,
            hand_tool: false,
            space_pan_active: false,
            panning: false,
        }
    }
}

impl ToolState {
    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn erasing(&self) -> bool {
        self.erasing
    }

    pub fn hand_tool(&self) -> bool {
        self.hand_tool
    }

    pub fn space_pan_active(&self) -> bool {
        self.space_pan_active
    }

    pub fn panning(&self) -> bool {
        self.panning
    }

    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
        if enabled {
            self.hand_tool = false;
        } else {
            self.erasing = false;
        }
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.erasing = erasing;
        if erasing {
            self.drawing_enabled = true;
            self.hand_tool = false;
        }
    }

    pub fn set_hand_tool(&mut self, hand_tool: bool) {
        self.hand_tool = hand_tool;
        if hand_tool {
            self.drawing_enabled = false;
            self.erasing = false;
        }
    }

    pub fn set_space_pan_active(&mut self, active: bool) {
        self.space_pan_active = active;
        if !active && !self.hand_tool {
            self.panning = false;
        }
    }

    pub fn set_panning(&mut self, panning: bool) {
        self.panning = panning;
    }

    /// Switch to the plain pen.
    pub fn select_pen(&mut self) {
        self.set_drawing_enabled(true);
        self.erasing = false;
    }

    pub fn mode(&self) -> InteractionMode {
        if self.hand_tool || self.space_pan_active {
            InteractionMode::Pan
        } else if self.erasing {
            InteractionMode::Erase
        } else if self.drawing_enabled {
            InteractionMode::Draw
        } else {
            InteractionMode::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eraser_forces_drawing_and_drops_hand() {
        let mut tools = ToolState::default();
        tools.set_hand_tool(true);
        tools.set_erasing(true);
        assert!(tools.erasing());
        assert!(tools.drawing_enabled());
        assert!(!tools.hand_tool());
        assert_eq!(tools.mode(), InteractionMode::Erase);
    }

    #[test]
    fn hand_tool_disables_drawing_and_erasing() {
        let mut tools = ToolState::default();
        tools.set_erasing(true);
        tools.set_hand_tool(true);
        assert!(tools.hand_tool());
        assert!(!tools.drawing_enabled());
        assert!(!tools.erasing());
        assert_eq!(tools.mode(), InteractionMode::Pan);
    }

    #[test]
    fn disabling_drawing_stops_erasing() {
        let mut tools = ToolState::default();
        tools.set_erasing(true);
        tools.set_drawing_enabled(false);
        assert!(!tools.erasing());
        assert_eq!(tools.mode(), InteractionMode::Idle);
    }

    #[test]
    fn space_pan_overrides_without_touching_flags() {
        let mut tools = ToolState::default();
        tools.set_erasing(true);
        tools.set_space_pan_active(true);
        assert_eq!(tools.mode(), InteractionMode::Pan);

        tools.set_space_pan_active(false);
        assert_eq!(tools.mode(), InteractionMode::Erase);
        assert!(!tools.panning());
    }

    #[test]
    fn select_pen_clears_eraser() {
        let mut tools = ToolState::default();
        tools.set_erasing(true);
        tools.select_pen();
        assert_eq!(tools.mode(), InteractionMode::Draw);
    }
}
