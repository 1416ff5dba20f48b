//! CPU tessellation of recorded draw commands into colored triangles.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::TAU;

use crate::canvas::{Color, DrawCommand, Style};

/// Curve samples per Catmull-Rom segment
const CURVE_STEPS: usize = 8;

/// Screen-space vertex (pixels, y down) with linear RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangle list for one frame plus the color to clear to
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub background: Option<Color>,
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.background = None;
        self.vertices.clear();
    }

    /// Append `commands`, scaling all geometry and stroke weights by `scale`.
    ///
    /// A `Clear` command wipes everything appended before it.
    pub fn extend(&mut self, commands: &[DrawCommand], scale: f32) {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => {
                    self.vertices.clear();
                    self.background = Some(*color);
                }
                DrawCommand::Ellipse {
                    center,
                    size,
                    style,
                } => self.ellipse(*center * scale, *size * scale, &scaled(style, scale)),
                DrawCommand::Line { from, to, style } => {
                    if let Some(stroke) = style.stroke {
                        self.segment(*from * scale, *to * scale, style.stroke_weight * scale, stroke);
                    }
                }
                DrawCommand::Rect {
                    origin,
                    size,
                    style,
                } => self.rect(*origin * scale, *size * scale, &scaled(style, scale)),
                DrawCommand::Point { at, style } => {
                    if let Some(stroke) = style.stroke {
                        let d = (style.stroke_weight * scale).max(1.0);
                        self.disc(*at * scale, Vec2::splat(d / 2.0), stroke);
                    }
                }
                DrawCommand::Shape {
                    vertices,
                    curved,
                    style,
                } => {
                    let points: Vec<Vec2> = vertices.iter().map(|v| *v * scale).collect();
                    let path = if *curved {
                        catmull_rom_path(&points)
                    } else {
                        points
                    };
                    self.path(&path, &scaled(style, scale));
                }
            }
        }
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        for p in [a, b, c] {
            self.vertices.push(Vertex {
                position: p.to_array(),
                color,
            });
        }
    }

    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }

    fn segment(&mut self, from: Vec2, to: Vec2, weight: f32, color: Color) {
        let dir = to - from;
        if dir.length_squared() <= f32::EPSILON || weight <= 0.0 {
            return;
        }
        let normal = dir.perp().normalize() * (weight / 2.0);
        self.quad(
            from + normal,
            to + normal,
            to - normal,
            from - normal,
            color.to_linear(),
        );
    }

    fn disc(&mut self, center: Vec2, radii: Vec2, color: Color) {
        let color = color.to_linear();
        let ring = ellipse_points(center, radii);
        for pair in ring.windows(2) {
            self.triangle(center, pair[0], pair[1], color);
        }
    }

    fn ellipse(&mut self, center: Vec2, size: Vec2, style: &Style) {
        let radii = size.abs() / 2.0;
        if let Some(fill) = style.fill {
            self.disc(center, radii, fill);
        }
        if let Some(stroke) = style.stroke {
            let half = style.stroke_weight / 2.0;
            if half <= 0.0 {
                return;
            }
            let outer = ellipse_points(center, radii + half);
            let inner = ellipse_points(center, (radii - half).max(Vec2::ZERO));
            let color = stroke.to_linear();
            for i in 0..outer.len() - 1 {
                self.quad(outer[i], outer[i + 1], inner[i + 1], inner[i], color);
            }
        }
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, style: &Style) {
        let min = origin.min(origin + size);
        let max = origin.max(origin + size);
        let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];

        if let Some(fill) = style.fill {
            self.quad(corners[0], corners[1], corners[2], corners[3], fill.to_linear());
        }
        if let Some(stroke) = style.stroke {
            for i in 0..4 {
                self.segment(corners[i], corners[(i + 1) % 4], style.stroke_weight, stroke);
            }
        }
    }

    /// Open path: filled as a fan from its first point, stroked segment by
    /// segment
    fn path(&mut self, points: &[Vec2], style: &Style) {
        if points.len() < 2 {
            return;
        }
        if let Some(fill) = style.fill {
            let color = fill.to_linear();
            for pair in points[1..].windows(2) {
                self.triangle(points[0], pair[0], pair[1], color);
            }
        }
        if let Some(stroke) = style.stroke {
            for pair in points.windows(2) {
                self.segment(pair[0], pair[1], style.stroke_weight, stroke);
            }
        }
    }
}

fn scaled(style: &Style, scale: f32) -> Style {
    Style {
        stroke_weight: style.stroke_weight * scale,
        ..*style
    }
}

/// Closed ring of points around an ellipse (first point repeated at the end)
fn ellipse_points(center: Vec2, radii: Vec2) -> Vec<Vec2> {
    let segments = ((radii.max_element() * 0.5).ceil() as usize).clamp(16, 128);
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radii
        })
        .collect()
}

/// Sample a Catmull-Rom spline through `points[1..len-1]`, using the first
/// and last points only to shape the ends
pub fn catmull_rom_path(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 4 {
        return Vec::new();
    }
    let mut path = Vec::with_capacity((points.len() - 3) * CURVE_STEPS + 1);
    path.push(points[1]);
    for w in points.windows(4) {
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            path.push(catmull_rom(w[0], w[1], w[2], w[3], t));
        }
    }
    path
}

fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fill_only(color: Color) -> Style {
        Style {
            fill: Some(color),
            stroke: None,
            stroke_weight: 1.0,
        }
    }

    fn stroke_only(weight: f32) -> Style {
        Style {
            fill: None,
            stroke: Some(Color::WHITE),
            stroke_weight: weight,
        }
    }

    fn bounds(mesh: &Mesh) -> (Vec2, Vec2) {
        mesh.vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_negative_height_rect_is_normalized() {
        let mut mesh = Mesh::new();
        mesh.extend(
            &[DrawCommand::Rect {
                origin: Vec2::new(10.0, 100.0),
                size: Vec2::new(20.0, -50.0),
                style: fill_only(Color::WHITE),
            }],
            1.0,
        );
        assert_eq!(mesh.vertices.len(), 6);
        let (lo, hi) = bounds(&mesh);
        assert_eq!(lo, Vec2::new(10.0, 50.0));
        assert_eq!(hi, Vec2::new(30.0, 100.0));
    }

    #[test]
    fn test_clear_discards_earlier_geometry() {
        let mut mesh = Mesh::new();
        let red = Color::rgb(255.0, 0.0, 0.0);
        mesh.extend(
            &[
                DrawCommand::Ellipse {
                    center: Vec2::ZERO,
                    size: Vec2::splat(10.0),
                    style: fill_only(Color::WHITE),
                },
                DrawCommand::Clear(red),
            ],
            1.0,
        );
        assert!(mesh.vertices.is_empty());
        assert_eq!(mesh.background, Some(red));
    }

    #[test]
    fn test_scale_applies_to_geometry_and_weight() {
        let mut mesh = Mesh::new();
        mesh.extend(
            &[DrawCommand::Line {
                from: Vec2::new(0.0, 10.0),
                to: Vec2::new(10.0, 10.0),
                style: stroke_only(4.0),
            }],
            2.0,
        );
        let (lo, hi) = bounds(&mesh);
        assert_relative_eq!(lo.y, 16.0);
        assert_relative_eq!(hi.y, 24.0);
        assert_relative_eq!(hi.x, 20.0);
    }

    #[test]
    fn test_line_without_stroke_or_length_is_skipped() {
        let mut mesh = Mesh::new();
        mesh.extend(
            &[
                DrawCommand::Line {
                    from: Vec2::ZERO,
                    to: Vec2::new(5.0, 5.0),
                    style: fill_only(Color::WHITE),
                },
                DrawCommand::Line {
                    from: Vec2::ONE,
                    to: Vec2::ONE,
                    style: stroke_only(3.0),
                },
            ],
            1.0,
        );
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn test_ellipse_fill_stays_inside_radius() {
        let mut mesh = Mesh::new();
        mesh.extend(
            &[DrawCommand::Ellipse {
                center: Vec2::new(50.0, 50.0),
                size: Vec2::new(40.0, 20.0),
                style: fill_only(Color::WHITE),
            }],
            1.0,
        );
        assert!(!mesh.vertices.is_empty());
        let (lo, hi) = bounds(&mesh);
        assert_relative_eq!(lo.x, 30.0, epsilon = 1e-3);
        assert_relative_eq!(hi.x, 70.0, epsilon = 1e-3);
        assert!(lo.y >= 40.0 - 1e-3 && hi.y <= 60.0 + 1e-3);
    }

    #[test]
    fn test_curve_passes_through_inner_points_only() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(30.0, 10.0),
        ];
        let path = catmull_rom_path(&points);
        assert_eq!(path.len(), CURVE_STEPS + 1);
        assert_eq!(path[0], points[1]);
        let end = path[path.len() - 1];
        assert_relative_eq!(end.x, 20.0, epsilon = 1e-4);
        assert_relative_eq!(end.y, 10.0, epsilon = 1e-4);
        assert!(catmull_rom_path(&points[..3]).is_empty());
    }

    #[test]
    fn test_vertex_color_is_linear() {
        let mut mesh = Mesh::new();
        let gray = Color::gray(128.0);
        mesh.extend(
            &[DrawCommand::Point {
                at: Vec2::new(5.0, 5.0),
                style: Style {
                    fill: None,
                    stroke: Some(gray),
                    stroke_weight: 2.0,
                },
            }],
            1.0,
        );
        assert!(!mesh.vertices.is_empty());
        assert_eq!(mesh.vertices[0].color, gray.to_linear());
    }
}
