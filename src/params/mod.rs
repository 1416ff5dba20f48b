//! Parameter definitions with units and documented defaults.
//!
//! Tunable numbers live here rather than inline, each with its unit and
//! meaning. The command line overrides a subset of them.

mod audio;
mod render;

// Re-export all types
pub use audio::AnalyzerConfig;
pub use render::{LayoutConfig, RecordingConfig, RenderConfig};
