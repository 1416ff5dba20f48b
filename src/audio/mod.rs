//! Microphone capture and spectrum/level analysis.
//!
//! Samples arrive on the `cpal` input callback, are mixed to mono and
//! buffered; a background thread turns the newest window into an
//! [`AudioFrame`] that the render loop copies once per redraw.

mod fft;
mod system;

pub use fft::{blackman_window, LevelMeter, SpectrumAnalyzer};
pub use system::AudioSystem;

use crate::error::Result;

/// One snapshot of analysed input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioFrame {
    /// RMS loudness, roughly 0..1
    pub level: f32,
    /// Per-bin magnitude scaled to 0..255, lowest frequency first
    pub spectrum: Vec<f32>,
}

/// Anything that can answer "how loud, and at which frequencies"
pub trait AudioSource {
    fn level(&self) -> f32;

    fn analyze(&self) -> Vec<f32>;

    /// Level and spectrum taken together
    fn frame(&self) -> AudioFrame {
        AudioFrame {
            level: self.level(),
            spectrum: self.analyze(),
        }
    }

    /// Unlock input after a user gesture; no-op for sources that need none
    fn resume(&self) -> Result<()> {
        Ok(())
    }
}

/// Stand-in source used when no input device can be opened
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl AudioSource for Silence {
    fn level(&self) -> f32 {
        0.0
    }

    fn analyze(&self) -> Vec<f32> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Replays a fixed frame and counts how often it was asked for
    struct Recorded {
        frame: AudioFrame,
        reads: Cell<usize>,
    }

    impl AudioSource for Recorded {
        fn level(&self) -> f32 {
            self.reads.set(self.reads.get() + 1);
            self.frame.level
        }

        fn analyze(&self) -> Vec<f32> {
            self.frame.spectrum.clone()
        }
    }

    #[test]
    fn test_default_frame_combines_level_and_spectrum() {
        let source = Recorded {
            frame: AudioFrame {
                level: 0.3,
                spectrum: vec![1.0, 2.0],
            },
            reads: Cell::new(0),
        };
        let frame = source.frame();
        assert_eq!(frame.level, 0.3);
        assert_eq!(frame.spectrum, vec![1.0, 2.0]);
        assert_eq!(source.reads.get(), 1);
        assert!(source.resume().is_ok());
    }

    #[test]
    fn test_silence_is_empty() {
        assert_eq!(Silence.frame(), AudioFrame::default());
    }
}
