mod component;
mod error;
mod geometry;
mod gesture;
mod hit;
mod render;
mod state;
mod store;
mod types;

pub use component::GraphEditorCanvas;
pub use types::GraphSnapshot;
