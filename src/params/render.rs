//! Rendering, board layout and recording configuration.

use crate::canvas::Color;
use crate::error::{Result, SoundboardError};

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Surface pixels per canvas unit (`None` = the window's scale factor).
    /// The canvas always spans the whole surface.
    pub pixel_density: Option<f32>,

    /// Color the canvas is cleared to every frame
    pub background: Color,

    /// Draw the trigger board over the visualizations
    pub show_board: bool,

    /// Seed for visualization randomness (`None` = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            pixel_density: None,
            background: Color::BLACK,
            show_board: true,
            seed: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(SoundboardError::Config(format!(
                "Window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if let Some(density) = self.pixel_density {
            if !(density.is_finite() && density > 0.0) {
                return Err(SoundboardError::Config(format!(
                    "Pixel density must be positive, got {}",
                    density
                )));
            }
        }
        Ok(())
    }
}

/// Radial trigger board geometry
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Buttons per ring
    pub group_size: usize,

    /// Distance from board centre to the innermost ring (pixels)
    pub base_radius_px: f32,

    /// Extra distance per ring (pixels)
    pub layer_depth_px: f32,

    /// Button diameter (pixels)
    pub button_size_px: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            group_size: 5,
            base_radius_px: 275.0,
            layer_depth_px: 125.0,
            button_size_px: 56.0,
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames and audio
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Audio file path
    pub fn audio_path(&self) -> String {
        format!("{}/audio.wav", self.output_dir)
    }
}
