//! Preset bundles and their deterministic derivation from a seed

/// Seeded preset generation
pub mod factory;
/// The preset bundle itself
pub mod preset;
/// Sampling ranges and overrides
pub mod ranges;

pub use factory::PresetFactory;
pub use preset::{BouquetKnobs, Preset};
pub use ranges::{FixedOverrides, ParameterRange, PresetRanges};
