use std::f32::consts::TAU;

use super::Visualization;
use crate::canvas::{map_range, Canvas, Color};

/// Horizontal distance between helix columns
const SPACING: f32 = 16.0;

/// Circle diameter
const DOT_SIZE: f32 = 16.0;

/// Peak vertical displacement of each strand
const AMPLITUDE: f32 = 75.0;

/// Two mirrored sine rows whose phase advances with the level
pub struct Helix {
    theta: f32,
    dx: f32,
}

impl Helix {
    pub fn new() -> Self {
        Self {
            theta: 0.0,
            dx: (TAU / 400.0) * SPACING,
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }
}

impl Default for Helix {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for Helix {
    fn name(&self) -> &'static str {
        "helix"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        self.theta += map_range(level, 0.0, 0.5, 0.0, 0.3);

        let columns = ((canvas.width() / 2.0) / SPACING).floor().max(0.0) as usize;
        let center_y = canvas.height() / 5.0;
        let shade = map_range(level, 0.0, 0.25, 2.0, 255.0);

        canvas.no_stroke();
        canvas.fill(Color::gray(shade));

        let mut x = self.theta;
        for i in 0..columns {
            let y = x.sin() * AMPLITUDE;
            let column_x = i as f32 * SPACING;
            canvas.ellipse(column_x, center_y + y, DOT_SIZE, DOT_SIZE);
            canvas.ellipse(column_x, center_y - y, DOT_SIZE, DOT_SIZE);
            x += self.dx;
        }
    }

    fn reset(&mut self) {
        self.theta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::visualization::test_support::{canvas, drawn, HEIGHT};
    use approx::assert_relative_eq;

    #[test]
    fn test_columns_derive_from_width() {
        let mut canvas = canvas();
        let mut helix = Helix::new();
        helix.visualize(0.0, &[], &mut canvas);
        // 1280 / 2 / 16 = 40 columns, two circles each
        assert_eq!(drawn(&canvas).len(), 80);
    }

    #[test]
    fn test_rows_are_mirrored() {
        let mut canvas = canvas();
        let mut helix = Helix::new();
        helix.visualize(0.25, &[], &mut canvas);

        for pair in drawn(&canvas).chunks(2) {
            match pair {
                [DrawCommand::Ellipse { center: a, .. }, DrawCommand::Ellipse { center: b, .. }] => {
                    assert_relative_eq!(a.x, b.x);
                    assert_relative_eq!(a.y + b.y, 2.0 * HEIGHT / 5.0, epsilon = 1e-3);
                }
                other => panic!("unexpected commands {:?}", other),
            }
        }
    }

    #[test]
    fn test_phase_advances_with_level_and_resets() {
        let mut canvas = canvas();
        let mut helix = Helix::new();
        helix.visualize(0.5, &[], &mut canvas);
        helix.visualize(0.25, &[], &mut canvas);
        assert_relative_eq!(helix.theta(), 0.45, epsilon = 1e-6);

        helix.reset();
        assert_eq!(helix.theta(), 0.0);
    }
}
