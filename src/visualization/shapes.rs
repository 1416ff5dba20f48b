//! Single-shape variants whose geometry is a direct remap of the level.

use super::Visualization;
use crate::canvas::{map_range, palette, Canvas, Color};

/// Level above which the ring switches to its loud style
const LOUD_LEVEL: f32 = 0.2;

/// Horizontal red bar that drops as the level rises
pub struct LineVibration;

impl Visualization for LineVibration {
    fn name(&self) -> &'static str {
        "line-vibration"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let y = height / 12.0 + map_range(level, 0.0, 1.0, 0.0, 800.0);

        canvas.stroke(palette::RED);
        canvas.stroke_weight(9.0);
        canvas.line(0.0, y, width, y);
    }
}

/// Wide ellipse whose height stretches with the level
pub struct ArcPulse;

impl Visualization for ArcPulse {
    fn name(&self) -> &'static str {
        "arc"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let size = map_range(level, 0.0, 1.0, 0.0, 550.0);

        canvas.stroke(palette::LIGHT_GRAY);
        canvas.stroke_weight(4.0);
        canvas.ellipse(width / 4.0, height / 4.0, width / 2.0 + 10.0, size * 10.0);
    }
}

/// Three concentric rings that brighten and thicken with the level
pub struct StationaryCircle;

impl Visualization for StationaryCircle {
    fn name(&self) -> &'static str {
        "stationary-circle"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        let (cx, cy) = (canvas.width() / 4.0, canvas.height() / 4.0);
        let size = map_range(level, 0.0, 0.5, 0.0, 300.0);
        let r = map_range(level, 0.0, 0.5, 18.0, 36.0 * 3.0);
        let g = map_range(level, 0.0, 0.5, 18.0, 39.0 * 3.0);
        let b = map_range(level, 0.0, 0.5, 18.0, 45.0 * 3.0);

        canvas.stroke(Color::rgb(r, g, b));
        for (weight, scale) in [(150.0, 4.0), (100.0, 3.0), (20.0, 4.5)] {
            canvas.stroke_weight(level * weight);
            canvas.ellipse(cx, cy, size * scale, size * scale);
        }
    }
}

/// Ring that jumps to a random horizontal position every frame
pub struct EllipsePulse;

impl Visualization for EllipsePulse {
    fn name(&self) -> &'static str {
        "ellipse"
    }

    fn visualize(&mut self, level: f32, _spectrum: &[f32], canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let (weight, color) = if level > LOUD_LEVEL {
            (12.0, palette::DULL_WHITE)
        } else {
            (4.0, palette::LIGHTER_GRAY)
        };
        let size = map_range(level, 0.0, 0.3, 0.0, 200.0);
        let jitter = canvas.random(-(width / 2.0), width / 2.0);

        canvas.stroke(color);
        canvas.stroke_weight(weight);
        canvas.ellipse(
            width / 4.0 + jitter,
            height / 4.0 - height / 6.0,
            size,
            size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::visualization::test_support::{canvas, drawn, HEIGHT, WIDTH};
    use approx::assert_relative_eq;

    #[test]
    fn test_line_vibration_position() {
        let mut canvas = canvas();
        LineVibration.visualize(0.5, &[], &mut canvas);

        match drawn(&canvas) {
            [DrawCommand::Line { from, to, style }] => {
                assert_relative_eq!(from.y, HEIGHT / 12.0 + 400.0);
                assert_relative_eq!(to.x, WIDTH);
                assert_eq!(style.stroke_weight, 9.0);
                assert_eq!(style.stroke, Some(palette::RED));
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_arc_height_tracks_level() {
        let mut canvas = canvas();
        ArcPulse.visualize(0.1, &[], &mut canvas);

        match drawn(&canvas) {
            [DrawCommand::Ellipse { size, style, .. }] => {
                assert_relative_eq!(size.x, WIDTH / 2.0 + 10.0);
                assert_relative_eq!(size.y, 550.0, epsilon = 1e-3);
                assert_eq!(style.fill, None);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_stationary_circle_draws_three_rings() {
        let mut canvas = canvas();
        StationaryCircle.visualize(0.5, &[], &mut canvas);

        let diameters: Vec<f32> = drawn(&canvas)
            .iter()
            .map(|c| match c {
                DrawCommand::Ellipse { size, .. } => size.x,
                other => panic!("unexpected command {:?}", other),
            })
            .collect();
        assert_eq!(diameters, vec![1200.0, 900.0, 1350.0]);
    }

    #[test]
    fn test_ellipse_switches_style_when_loud() {
        let mut quiet = canvas();
        EllipsePulse.visualize(0.1, &[], &mut quiet);
        let mut loud = canvas();
        EllipsePulse.visualize(0.25, &[], &mut loud);

        let style_of = |c: &Canvas| match drawn(c) {
            [DrawCommand::Ellipse { style, center, .. }] => {
                assert!(center.x >= WIDTH / 4.0 - WIDTH / 2.0);
                assert!(center.x < WIDTH / 4.0 + WIDTH / 2.0);
                *style
            }
            other => panic!("unexpected commands {:?}", other),
        };
        assert_eq!(style_of(&quiet).stroke_weight, 4.0);
        assert_eq!(style_of(&loud).stroke, Some(palette::DULL_WHITE));
    }
}
