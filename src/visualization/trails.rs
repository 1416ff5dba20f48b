//! Trail variants that plot their recent level history as a path.

use super::{LevelHistory, Visualization};
use crate::canvas::{map_range, palette, Canvas, Color};

/// Samples kept by [`Radial`], one per degree
pub const RADIAL_CAPACITY: usize = 360;

/// Level above which the radial trace turns white
const RADIAL_BRIGHT_LEVEL: f32 = 0.082;

/// Level history drawn around a circle, one degree per sample
pub struct Radial {
    history: LevelHistory,
}

impl Radial {
    pub fn new() -> Self {
        Self {
            history: LevelHistory::new(),
        }
    }
}

impl Default for Radial {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for Radial {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        let color = if level > RADIAL_BRIGHT_LEVEL {
            palette::DULL_WHITE
        } else {
            palette::RED
        };
        self.history.push(level);

        let (cx, cy) = (canvas.width() / 2.0, canvas.height() / 4.0);
        canvas.stroke(color);
        canvas.stroke_weight(2.0);

        canvas.begin_shape();
        for (i, sample) in self.history.iter().skip(1) {
            let r = map_range(sample, 0.0, 0.2, 10.0, 1000.0);
            let angle = (i as f32 + 210.0).to_radians();
            canvas.vertex(cx + r * angle.cos(), cy + r * angle.sin());
        }
        canvas.end_shape();

        self.history.evict_to(RADIAL_CAPACITY);
    }

    fn history(&self) -> Option<&LevelHistory> {
        Some(&self.history)
    }

    fn history_mut(&mut self) -> Option<&mut LevelHistory> {
        Some(&mut self.history)
    }
}

/// Initial value of the spiral's growth scalar
pub const SPIRAL_INITIAL_GROWTH: f32 = 0.001;

/// Growth added per frame
const SPIRAL_GROWTH_STEP: f32 = 0.0005;

/// Unbounded history unwound as a slowly expanding spiral
pub struct Spiral {
    history: LevelHistory,
    growth: f32,
}

impl Spiral {
    pub fn new() -> Self {
        Self {
            history: LevelHistory::new(),
            growth: SPIRAL_INITIAL_GROWTH,
        }
    }

    /// Current radius scale; grows every active frame until `reset`
    pub fn growth(&self) -> f32 {
        self.growth
    }
}

impl Default for Spiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for Spiral {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        self.history.push(level * 2.0);

        let shade = map_range(self.growth, 0.0, 2.0, 30.0, 255.0);
        canvas.stroke(Color::gray(shade));
        canvas.stroke_weight(0.3);

        let (cx, cy) = (canvas.width() / 5.0, canvas.height() / 4.0);
        canvas.begin_shape();
        for (i, sample) in self.history.iter().skip(1) {
            let r = map_range(sample, 0.0, 0.6, 10.0, 700.0);
            let angle = (i as f32).to_radians();
            canvas.vertex(
                cx + r * angle.cos() * self.growth,
                cy + r * angle.sin() * self.growth,
            );
        }
        canvas.end_shape();

        self.growth += SPIRAL_GROWTH_STEP;
    }

    fn history(&self) -> Option<&LevelHistory> {
        Some(&self.history)
    }

    fn history_mut(&mut self) -> Option<&mut LevelHistory> {
        Some(&mut self.history)
    }

    fn reset(&mut self) {
        self.history.clear();
        self.growth = SPIRAL_INITIAL_GROWTH;
    }
}

/// Scrolling amplitude graph, one pixel per sample across half the canvas
pub struct Amp {
    history: LevelHistory,
}

impl Amp {
    pub fn new() -> Self {
        Self {
            history: LevelHistory::new(),
        }
    }

    /// Samples kept for a canvas of `width`
    pub fn capacity(width: f32) -> usize {
        (width / 2.0).max(0.0).floor() as usize
    }
}

impl Default for Amp {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for Amp {
    fn name(&self) -> &'static str {
        "amp"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        self.history.push(level * 2.0);

        let height = canvas.height();
        canvas.stroke(palette::RED);
        canvas.stroke_weight(2.0);

        canvas.begin_shape();
        for (i, sample) in self.history.iter().skip(1) {
            canvas.vertex(i as f32, map_range(sample, 0.0, 0.5, height / 2.0, 0.0));
        }
        canvas.end_shape();

        self.history.evict_to(Self::capacity(canvas.width()));
    }

    fn history(&self) -> Option<&LevelHistory> {
        Some(&self.history)
    }

    fn history_mut(&mut self) -> Option<&mut LevelHistory> {
        Some(&mut self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::visualization::test_support::{canvas, drawn, HEIGHT, WIDTH};
    use approx::assert_relative_eq;

    #[test]
    fn test_radial_history_is_capped() {
        let mut radial = Radial::new();
        let mut canvas = canvas();
        for frame in 0..1000 {
            radial.visualize(0.05 + (frame % 7) as f32 * 0.01, &[], &mut canvas);
            assert!(radial.history.len() <= RADIAL_CAPACITY);
        }
        assert_eq!(radial.history.len(), RADIAL_CAPACITY);
    }

    #[test]
    fn test_radial_evicts_oldest_first() {
        let mut radial = Radial::new();
        let mut canvas = canvas();
        for frame in 0..(RADIAL_CAPACITY + 5) {
            radial.visualize(frame as f32, &[], &mut canvas);
        }
        let first = radial.history.iter().next().map(|(_, v)| v);
        assert_eq!(first, Some(5.0));
    }

    #[test]
    fn test_radial_color_threshold() {
        let mut radial = Radial::new();
        let mut canvas = canvas();
        radial.visualize(0.05, &[], &mut canvas);
        radial.visualize(0.05, &[], &mut canvas);
        radial.visualize(0.1, &[], &mut canvas);

        // the first two frames have too few vertices to form a path
        match drawn(&canvas) {
            [DrawCommand::Shape { vertices, style, .. }] => {
                assert_eq!(vertices.len(), 2);
                assert_eq!(style.stroke, Some(palette::DULL_WHITE));
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_amp_capacity_follows_canvas_width() {
        let mut amp = Amp::new();
        let mut canvas = canvas();
        for _ in 0..2000 {
            amp.visualize(0.2, &[], &mut canvas);
            assert!(amp.history.len() <= (WIDTH / 2.0) as usize);
        }
        assert_eq!(amp.history.len(), 640);

        canvas.resize(400.0, HEIGHT);
        amp.visualize(0.2, &[], &mut canvas);
        assert_eq!(amp.history.len(), 200);
    }

    #[test]
    fn test_amp_vertices_scale_level() {
        let mut amp = Amp::new();
        let mut canvas = canvas();
        amp.visualize(0.0, &[], &mut canvas);
        amp.visualize(0.0, &[], &mut canvas);
        amp.visualize(0.125, &[], &mut canvas);

        match drawn(&canvas).last() {
            Some(DrawCommand::Shape { vertices, .. }) => {
                assert_eq!(vertices.len(), 2);
                assert_relative_eq!(vertices[0].y, HEIGHT / 2.0);
                assert_relative_eq!(vertices[1].x, 2.0);
                assert_relative_eq!(vertices[1].y, HEIGHT / 4.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_spiral_growth_and_reset() {
        let mut spiral = Spiral::new();
        let mut canvas = canvas();
        for _ in 0..10 {
            spiral.visualize(0.1, &[], &mut canvas);
        }
        assert_eq!(spiral.history.len(), 10);
        assert_relative_eq!(spiral.growth(), 0.001 + 10.0 * 0.0005, epsilon = 1e-6);

        spiral.reset();
        assert!(spiral.history.is_empty());
        assert_eq!(spiral.growth(), SPIRAL_INITIAL_GROWTH);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut radial = Radial::new();
        let mut canvas = canvas();
        for _ in 0..50 {
            radial.visualize(0.1, &[], &mut canvas);
        }
        radial.reset();
        assert_eq!(radial.history().map(LevelHistory::len), Some(0));
    }
}
