//! Command-line argument parsing.

use clap::Parser;

use crate::params::{AnalyzerConfig, RecordingConfig, RenderConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "soundboard")]
#[command(about = "Keyboard-triggered audio-reactive visual soundboard", long_about = None)]
pub struct Args {
    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Surface pixels per canvas unit [default: window scale factor]
    #[arg(long, value_name = "FACTOR")]
    pub density: Option<f32>,

    /// Spectrum smoothing between analyses, in [0, 1)
    #[arg(long, value_name = "FACTOR", default_value = "0.8")]
    pub smoothing: f32,

    /// Level meter decay between analyses, in [0, 1)
    #[arg(long, value_name = "FACTOR", default_value = "0.0")]
    pub level_smoothing: f32,

    /// Record frames and microphone audio (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Output directory for recordings
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output_dir: String,

    /// Hide the trigger board
    #[arg(long)]
    pub hide_board: bool,

    /// Seed for visualization randomness
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            pixel_density: self.density,
            show_board: !self.hide_board,
            seed: self.seed,
            ..RenderConfig::default()
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            smoothing: self.smoothing,
            level_smoothing: self.level_smoothing,
            ..AnalyzerConfig::default()
        }
    }

    /// Recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            output_dir: self.output_dir.clone(),
            ..RecordingConfig::new(duration)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_configs() {
        let args = Args::parse_from(["soundboard"]);
        let render = args.render_config();
        assert_eq!(render.window_width, 1280);
        assert_eq!(render.pixel_density, None);
        assert!(render.show_board);
        assert!(args.analyzer_config().validate().is_ok());
        assert!(args.recording_config().is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "soundboard",
            "--density",
            "1",
            "--smoothing",
            "0.5",
            "--record",
            "3",
            "--output-dir",
            "out",
            "--hide-board",
            "--seed",
            "7",
        ]);
        let render = args.render_config();
        assert_eq!(render.pixel_density, Some(1.0));
        assert!(!render.show_board);
        assert_eq!(render.seed, Some(7));
        assert_eq!(args.analyzer_config().smoothing, 0.5);

        let recording = args.recording_config().unwrap();
        assert_eq!(recording.total_frames(), 180);
        assert_eq!(recording.frames_dir(), "out/frames");
    }
}
