use crate::canvas::CanvasView;
use crate::model::SketchModel;
use crate::panels::{central_panel, tools_panel};
use crate::persistence;

pub struct SketchApp {
    pub(crate) model: SketchModel,
    pub(crate) canvas: CanvasView,
    /// Outcome of the last export, shown under the export button.
    pub(crate) export_status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_model(SketchModel::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let model = cc
            .storage
            .and_then(persistence::load_archive)
            .map(SketchModel::from_archive)
            .unwrap_or_default();
        Self::with_model(model)
    }

    pub fn with_model(model: SketchModel) -> Self {
        Self {
            model,
            canvas: CanvasView::new(),
            export_status: None,
        }
    }

    pub fn model(&self) -> &SketchModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut SketchModel {
        &mut self.model
    }

    /// Write the archive if anything persistent changed this frame.
    pub fn persist_pending(&mut self, storage: Option<&mut (dyn eframe::Storage + 'static)>) {
        let Some(archive) = self.model.take_pending_archive() else {
            return;
        };
        match storage {
            Some(storage) => {
                if let Err(err) = persistence::store_archive(storage, &archive) {
                    log::error!("Failed to persist sketch: {}", err);
                }
            }
            None => log::debug!("No storage available, sketch not persisted"),
        }
    }

    /// Ask for a destination and write the canvas there as PNG.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("sketch.png")
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            log::debug!("Export cancelled");
            return;
        };

        let document = self.model.document();
        let background = self.model.background_color();
        self.export_status = match crate::export::export_png(document, background, &path) {
            Ok((width, height)) => Some(format!("Saved {width}×{height} PNG")),
            Err(err) => {
                log::error!("Export to {} failed: {}", path.display(), err);
                Some("Export failed".to_owned())
            }
        };
    }

    #[cfg(target_arch = "wasm32")]
    pub fn export_png(&mut self) {
        log::warn!("PNG export is only available in the native app");
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = persistence::store_archive(storage, &self.model.to_archive()) {
            log::error!("Failed to save sketch on shutdown: {}", err);
        }
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.persist_pending(frame.storage_mut());
    }
}
