use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::SketchApp;
use crate::components::ToolButton;
use crate::config::{ERASER_SIZE_RANGE, PEN_SIZE_RANGE};

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(190.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let tools = *app.model.tools();
            ui.horizontal(|ui| {
                let pen_active = tools.drawing_enabled() && !tools.erasing() && !tools.hand_tool();
                if ToolButton::new("✏", "Pen (B)", pen_active).show(ui).clicked() {
                    if pen_active {
                        app.model.set_drawing_enabled(false);
                    } else {
                        app.model.select_pen();
                    }
                }
                if ToolButton::new("⌫", "Eraser (E)", tools.erasing()).show(ui).clicked() {
                    app.model.set_erasing(!tools.erasing());
                }
                if ToolButton::new("✋", "Hand (H, or hold Space)", tools.hand_tool())
                    .show(ui)
                    .clicked()
                {
                    app.model.set_hand_tool(!tools.hand_tool());
                }
            });

            ui.separator();

            let mut ink = app.model.ink_color();
            ui.horizontal(|ui| {
                ui.label("Ink:");
                if color_edit_button_srgba(ui, &mut ink, Alpha::Opaque).changed() {
                    app.model.set_ink_color(ink);
                }
            });

            let mut background = app.model.background_color();
            ui.horizontal(|ui| {
                ui.label("Background:");
                if color_edit_button_srgba(ui, &mut background, Alpha::Opaque).changed() {
                    app.model.set_background_color(background);
                }
            });

            let mut pen_size = app.model.pen_size();
            if ui
                .add(egui::Slider::new(&mut pen_size, PEN_SIZE_RANGE).text("Pen"))
                .changed()
            {
                app.model.set_pen_size(pen_size);
            }

            let mut eraser_size = app.model.eraser_size();
            if ui
                .add(egui::Slider::new(&mut eraser_size, ERASER_SIZE_RANGE).text("Eraser"))
                .changed()
            {
                app.model.set_eraser_size(eraser_size);
            }

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("−").on_hover_text("Zoom out (Cmd -)").clicked() {
                    app.model.zoom_out();
                }
                ui.label(format!("{:.0}%", app.model.transform().scale() * 100.0));
                if ui.button("+").on_hover_text("Zoom in (Cmd +)").clicked() {
                    app.model.zoom_in();
                }
                if ui.button("Reset").on_hover_text("Reset view (Cmd 0)").clicked() {
                    app.model.reset_view();
                }
            });

            ui.separator();

            ui.label(format!("Segments: {}", app.model.document().len()));
            ui.horizontal(|ui| {
                if ui.button("Clear").on_hover_text("Cmd Backspace").clicked() {
                    app.model.clear();
                }
                if ui.button("Export PNG…").clicked() {
                    app.export_png();
                }
            });

            if let Some(status) = &app.export_status {
                ui.small(status.as_str());
            }
        });
}
