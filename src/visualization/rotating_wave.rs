use std::f32::consts::TAU;

use super::Visualization;
use crate::canvas::{map_range, Canvas, Color};

const SPEED: f32 = 0.03;
const MAX_CIRCLE_SIZE: f32 = 15.0;
const ROWS: usize = 10;
const COLUMNS: usize = 16;
const STRANDS: usize = 3;

const COLOR_TOP: Color = Color {
    r: 28.0,
    g: 32.0,
    b: 38.0,
    a: 50.0,
};
const COLOR_BOTTOM: Color = Color {
    r: 120.0,
    g: 120.0,
    b: 120.0,
    a: 50.0,
};

/// Three interleaved strands of circles rolling across the canvas. The phase
/// comes from the frame counter, the circle size from the level.
pub struct RotatingWave {
    phase: f32,
}

impl RotatingWave {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Default for RotatingWave {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for RotatingWave {
    fn name(&self) -> &'static str {
        "rotating-wave"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        self.phase = canvas.frame_count() as f32 * SPEED;
        let multiplier = map_range(level, 0.0, 0.3, 1.0, 10.0);
        let (width, height) = (canvas.width(), canvas.height());

        canvas.no_stroke();
        for strand in 0..STRANDS {
            let strand_phase = self.phase + map_range(strand as f32, 0.0, STRANDS as f32, 0.0, TAU);

            for col in 0..COLUMNS {
                let col_offset = map_range(col as f32, 0.0, COLUMNS as f32, 0.0, TAU);
                let x = map_range(col as f32, 0.0, COLUMNS as f32, 50.0, width - 50.0);
                let y_base = height / 4.0 + (strand_phase + col_offset).sin() * 150.0;

                for row in 0..ROWS {
                    let row_t = row as f32 / ROWS as f32;
                    let y = y_base + row as f32 * 10.0;
                    let size_offset = ((strand_phase - row_t + col_offset).cos() + 1.0) * 0.7;
                    let size = size_offset * MAX_CIRCLE_SIZE * multiplier;

                    canvas.fill(COLOR_TOP.lerp(COLOR_BOTTOM, row_t));
                    canvas.ellipse(x, y, size, size);
                }
            }
        }
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
