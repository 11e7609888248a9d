#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
mod geometry;
pub mod input;
pub mod model;
pub mod panels;
pub mod persistence;
pub mod stroke;
pub mod tool_state;
pub mod transform;

pub use app::SketchApp;
pub use canvas::CanvasView;
pub use document::Document;
pub use error::{ExportError, PersistenceError};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use model::SketchModel;
pub use persistence::{Archive, MemoryStorage};
pub use stroke::LineSegment;
pub use tool_state::{InteractionMode, ToolState};
pub use transform::ViewTransform;
