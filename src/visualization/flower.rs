use super::Visualization;
use crate::bins::peak;
use crate::canvas::{map_range, palette, Canvas, Color};

/// Starting angles of the two petal rings, in degrees
const INITIAL_ANGLES: (f32, f32) = (0.0, 27.0);

/// Degrees each ring's pulse angle advances per frame
const ANGLE_STEP: f32 = 5.0;

/// Two rings of petals that breathe with the low and high halves of the
/// spectrum
pub struct Flower {
    angle1: f32,
    angle2: f32,
}

impl Flower {
    pub fn new() -> Self {
        Self {
            angle1: INITIAL_ANGLES.0,
            angle2: INITIAL_ANGLES.1,
        }
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.angle1, self.angle2)
    }
}

impl Default for Flower {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualization for Flower {
    fn name(&self) -> &'static str {
        "flower"
    }

    fn visualize(&mut self, level: f32, spectrum: &[f32], canvas: &mut Canvas) {
        let (low, high) = spectrum.split_at(spectrum.len() / 2);
        let (width, height) = (canvas.width(), canvas.height());

        let (x1, y1) = (width / 7.0, height / 4.0 - height / 12.0);
        let (x2, y2) = (width / 3.0 + height / 12.0, height / 3.0);

        canvas.no_stroke();

        self.angle1 = (self.angle1 + ANGLE_STEP) % 360.0;
        self.angle2 = (self.angle2 + ANGLE_STEP) % 360.0;
        let offset1 = map_range(peak(low), 0.0, 300.0, 10.0, 320.0);
        let offset2 = map_range(peak(high), 0.0, 130.0, 10.0, 320.0);
        let shade = map_range(level, 0.0, 0.2, 0.0, 230.0);
        let reach1 = self.angle1.to_radians().cos() * offset1;
        let reach2 = self.angle2.to_radians().cos() * offset2;

        canvas.fill(Color::rgba(148.0, shade, shade, 150.0));
        for a in (0..360).step_by(75) {
            let a = (a as f32).to_radians();
            canvas.ellipse(x1 + a.cos() * reach1, y1 + a.sin() * reach1, 40.0, 40.0);
        }

        canvas.fill(Color::rgba(148.0, shade, shade, 120.0));
        for a in (0..360).step_by(52) {
            let a = (a as f32).to_radians();
            canvas.ellipse(x2 + a.cos() * reach2, y2 + a.sin() * reach2, 20.0, 20.0);
        }

        canvas.fill(palette::DULL_WHITE.with_alpha(150.0));
        canvas.ellipse(x1, y1, 2.0, 2.0);
        canvas.ellipse(x2, y2, 2.0, 2.0);
    }

    fn reset(&mut self) {
        self.angle1 = INITIAL_ANGLES.0;
        self.angle2 = INITIAL_ANGLES.1;
    }
}
