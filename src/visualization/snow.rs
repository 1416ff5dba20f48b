use super::Visualization;
use crate::bins::bin_at;
use crate::canvas::{map_range, Canvas, Color};

/// Dotted random walk across the top of the canvas whose step size follows
/// the spectrum. Recomputed from scratch every frame.
pub struct Snow;

impl Visualization for Snow {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn visualize(&mut self, _level: f32, spectrum: &[f32], canvas: &mut Canvas) {
        let half_width = canvas.width() / 2.0;
        let baseline = canvas.height() / 12.0;
        let steps = spectrum.len() as f32 / 2.0 + 1.0;
        let mut spread = 0.0f32;

        canvas.stroke_weight(1.0);

        let mut i = 1usize;
        while (i as f32) < steps {
            let x = (half_width / steps) * i as f32;
            let y = baseline + canvas.random(-spread, spread);
            let shade = map_range(x, 0.0, half_width, 80.0, 240.0);
            canvas.stroke(Color::gray(shade));
            canvas.point(x, y);

            let magnitude = bin_at(spectrum, i).unwrap_or(0.0);
            let range = map_range(magnitude, 0.0, 200.0, 1.0, 25.0);
            spread += canvas.random(-range, range);
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::visualization::test_support::{canvas, drawn, WIDTH};

    #[test]
    fn test_point_count_follows_spectrum_length() {
        let mut even = canvas();
        Snow.visualize(0.0, &vec![100.0; 64], &mut even);
        // steps = 33, points for i in 1..33
        assert_eq!(drawn(&even).len(), 32);

        let mut odd = canvas();
        Snow.visualize(0.0, &vec![100.0; 5], &mut odd);
        // steps = 3.5, points for i = 1, 2, 3
        assert_eq!(drawn(&odd).len(), 3);
    }

    #[test]
    fn test_points_advance_left_to_right() {
        let mut canvas = canvas();
        Snow.visualize(0.0, &vec![200.0; 128], &mut canvas);

        let xs: Vec<f32> = drawn(&canvas)
            .iter()
            .map(|c| match c {
                DrawCommand::Point { at, .. } => at.x,
                other => panic!("unexpected command {:?}", other),
            })
            .collect();
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert!(xs.iter().all(|&x| x < WIDTH / 2.0));
    }

    #[test]
    fn test_empty_spectrum_draws_nothing() {
        let mut canvas = canvas();
        Snow.visualize(0.4, &[], &mut canvas);
        assert!(drawn(&canvas).is_empty());
    }
}
