//! Input/output: configuration, assets, rendering, export and error handling

/// Asset loading, fallbacks and cancellable load tasks
pub mod assets;
/// Command-line interface
pub mod cli;
/// Constants and the versioned configuration document
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// Logging setup
pub mod logging;
/// Batch progress display
pub mod progress;
/// Reference cell renderer
pub mod render;
/// Progressive-reveal GIF export
pub mod visualization;
