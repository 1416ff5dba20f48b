//! Visualization variants.
//!
//! Every variant maps the current `(level, spectrum)` pair to draw calls on
//! the shared [`Canvas`]. Variants own whatever history or phase state they
//! need and never look at each other.

mod bars;
mod curve;
mod flower;
mod helix;
mod particles;
mod rotating_wave;
mod shapes;
mod snow;
mod trails;

use std::collections::VecDeque;

use crate::canvas::Canvas;

pub use bars::SpectrumBars;
pub use curve::Curve;
pub use flower::Flower;
pub use helix::Helix;
pub use particles::ParticleScurry;
pub use rotating_wave::RotatingWave;
pub use shapes::{ArcPulse, EllipsePulse, LineVibration, StationaryCircle};
pub use snow::Snow;
pub use trails::{Amp, Radial, Spiral};

/// Draw policy driven by audio level and spectrum
pub trait Visualization: Send {
    /// Short human-readable name, used in logs
    fn name(&self) -> &'static str;

    /// Draw one frame
    fn visualize(&mut self, level: f32, spectrum: &[f32], canvas: &mut Canvas);

    /// Level history, for variants that keep one
    fn history(&self) -> Option<&LevelHistory> {
        None
    }

    fn history_mut(&mut self) -> Option<&mut LevelHistory> {
        None
    }

    /// Restore the initial state. Clears the history by default.
    fn reset(&mut self) {
        if let Some(history) = self.history_mut() {
            history.clear();
        }
    }
}

/// FIFO of past level samples used by trail-style variants
#[derive(Debug, Default, Clone)]
pub struct LevelHistory {
    samples: VecDeque<f32>,
}

impl LevelHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: f32) {
        self.samples.push_back(level);
    }

    /// Drop the oldest samples until at most `capacity` remain
    pub fn evict_to(&mut self, capacity: usize) {
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples from oldest to newest, paired with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.samples.iter().copied().enumerate()
    }
}

/// Every available variant, used by the key table to build instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
    Ellipse,
    LineVibration,
    Amp,
    Spectrum,
    Radial,
    ParticleScurry,
    Curve,
    Helix,
    StationaryCircle,
    Flower,
    Arc,
    Spiral,
    Snow,
    RotatingWave,
}

impl VisualizationKind {
    /// Construct a fresh instance; some variants size themselves from the
    /// canvas or draw random initial state from it
    pub fn build(self, canvas: &mut Canvas) -> Box<dyn Visualization> {
        match self {
            VisualizationKind::Ellipse => Box::new(EllipsePulse),
            VisualizationKind::LineVibration => Box::new(LineVibration),
            VisualizationKind::Amp => Box::new(Amp::new()),
            VisualizationKind::Spectrum => Box::new(SpectrumBars),
            VisualizationKind::Radial => Box::new(Radial::new()),
            VisualizationKind::ParticleScurry => Box::new(ParticleScurry::new(canvas)),
            VisualizationKind::Curve => Box::new(Curve),
            VisualizationKind::Helix => Box::new(Helix::new()),
            VisualizationKind::StationaryCircle => Box::new(StationaryCircle),
            VisualizationKind::Flower => Box::new(Flower::new()),
            VisualizationKind::Arc => Box::new(ArcPulse),
            VisualizationKind::Spiral => Box::new(Spiral::new()),
            VisualizationKind::Snow => Box::new(Snow),
            VisualizationKind::RotatingWave => Box::new(RotatingWave::new()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::canvas::{Canvas, Color, DrawCommand};

    pub const WIDTH: f32 = 1280.0;
    pub const HEIGHT: f32 = 720.0;

    /// Canvas with a fixed seed and an open frame
    pub fn canvas() -> Canvas {
        let mut canvas = Canvas::new(WIDTH, HEIGHT, Some(42));
        canvas.begin_frame(Color::BLACK);
        canvas.no_fill();
        canvas
    }

    /// Commands drawn after the frame's clear
    pub fn drawn(canvas: &Canvas) -> &[DrawCommand] {
        &canvas.commands()[1..]
    }

    pub fn ramp(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| 255.0 * i as f32 / (len.max(2) - 1) as f32)
            .collect()
    }
}
