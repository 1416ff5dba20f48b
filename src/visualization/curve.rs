use super::Visualization;
use crate::bins::{clipped, peak, smooth_point};
use crate::canvas::{map_range, Canvas, Color};

/// Bins sampled to drive the stroke intensity
const HIGH_BAND: (usize, usize) = (779, 860);

/// Smoothed spectrum outline across the whole bin range
pub struct Curve;

impl Visualization for Curve {
    fn name(&self) -> &'static str {
        "curve"
    }

    fn visualize(&mut self, _level: f32, spectrum: &[f32], canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let last = spectrum.len().saturating_sub(1) as f32;

        let high = peak(clipped(spectrum, HIGH_BAND.0, HIGH_BAND.1));
        let shade = map_range(high, 0.0, 145.0, 10.0, 255.0);
        canvas.stroke(Color::rgb(148.0, shade, shade));
        canvas.stroke_weight(1.0);

        canvas.begin_shape();
        for i in 0..spectrum.len() {
            let point = smooth_point(spectrum, i);
            let x = map_range(i as f32, 0.0, last, 0.0, width / 2.0);
            let y = map_range(point, 0.0, 255.0, height / 2.0 - 3.0, 0.0);
            canvas.curve_vertex(x, y);
        }
        canvas.end_shape();
    }
}
