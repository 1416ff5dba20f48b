use super::Visualization;
use crate::canvas::{map_range, Canvas, Color};

/// One bar per spectrum bin, hanging from the bottom edge
pub struct SpectrumBars;

impl Visualization for SpectrumBars {
    fn name(&self) -> &'static str {
        "spectrum"
    }

    fn visualize(&mut self, _level: f32, spectrum: &[f32], canvas: &mut Canvas) {
        let len = spectrum.len() as f32;
        let (width, height) = (canvas.width(), canvas.height());
        let bar_width = (width / 2.0) / len;

        canvas.no_stroke();
        for (i, &value) in spectrum.iter().enumerate() {
            let i = i as f32;
            let x = map_range(i, 0.0, len, 0.0, width / 2.0);
            let h = -height + map_range(value, 0.0, 255.0, height / 2.0, 0.0);
            let shade = map_range(i, 0.0, len / 2.0, 10.0, 255.0);

            canvas.fill(Color::rgba(148.0, shade, shade, 120.0));
            canvas.rect(x + i, height, bar_width, h);
        }
    }
}
