//! Soundboard library - keyboard-triggered audio-reactive visuals

pub mod audio;
pub mod bins;
pub mod canvas;
pub mod cli;
pub mod definition;
pub mod error;
pub mod input;
pub mod layout;
pub mod params;
pub mod rendering;
pub mod soundboard;
pub mod visualization;
