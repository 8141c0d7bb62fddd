//! Mosaic composition: orchestration, draw order and budgets

/// Per-subject bouquet anchors
pub mod anchors;
/// Shared cell budget split across layers
pub mod budget;
/// Builds finished compositions from presets
pub mod compositor;
/// Drawable cells and shuffled draw order
pub mod draw_order;

pub use compositor::{CanvasSize, Composition, Compositor};
pub use draw_order::{DrawCell, DrawCells, DrawOrder};
