use glam::Vec2;

use super::Visualization;
use crate::bins::bin_at;
use crate::canvas::{map_range, palette, Canvas};

/// Size of the particle pool, one particle per low spectrum bin
pub const PARTICLE_COUNT: usize = 256;

#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    scale: f32,
    speed: f32,
}

/// Particles riding their bin's magnitude while drifting right
pub struct ParticleScurry {
    particles: Vec<Particle>,
}

impl ParticleScurry {
    /// Seed the pool over the left half and top quarter of the canvas
    pub fn new(canvas: &mut Canvas) -> Self {
        let (width, height) = (canvas.width(), canvas.height());
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let x = canvas.random(0.0, width / 2.0);
                let y = canvas.random(0.0, height / 4.0);
                Particle {
                    position: Vec2::new(x, y),
                    scale: canvas.random(0.0, 1.0),
                    speed: canvas.random(0.0, 10.0),
                }
            })
            .collect();
        Self { particles }
    }
}

impl Visualization for ParticleScurry {
    fn name(&self) -> &'static str {
        "particle-scurry"
    }

    fn visualize(&mut self, level: f32, spectrum: &[f32], canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let opacity = map_range(level, 0.0, 0.5, 100.0, 150.0);

        canvas.no_stroke();
        canvas.fill(palette::LIGHT_GRAY.with_alpha(opacity));

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let Some(value) = bin_at(spectrum, i) else {
                continue;
            };
            let this_level = map_range(value, 0.0, 255.0, 0.0, 1.0) * 2.5;

            particle.position.y = value * 5.0 - height / 8.0;
            particle.position.x += particle.speed / this_level;
            // a silent bin divides by zero, which sends the particle home
            if !particle.position.x.is_finite() || particle.position.x > width {
                particle.position.x = 0.0;
            }

            let diameter = map_range(this_level, 0.0, 1.0, 0.0, 100.0) * particle.scale;
            canvas.ellipse(
                particle.position.x,
                particle.position.y,
                diameter,
                diameter,
            );
        }
    }
}
