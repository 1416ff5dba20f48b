//! Retained-mode drawing context.
//!
//! Visualizations draw through a small p5-style API: a current fill, stroke
//! and stroke weight, plus immediate primitives. Each primitive is recorded
//! as a [`DrawCommand`] carrying the style that was current when it was
//! issued, so a frame is just a list of commands the renderer tessellates.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RGBA color with channels in `0.0..=255.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xFFFFFF);

    /// Opaque color from a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32,
            g: ((rgb >> 8) & 0xFF) as f32,
            b: (rgb & 0xFF) as f32,
            a: 255.0,
        }
    }

    /// Opaque color; channels are clamped to `0..=255`
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 255.0)
    }

    /// Color with alpha; channels are clamped to `0..=255`
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    pub fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn gray_alpha(v: f32, a: f32) -> Self {
        Self::rgba(v, v, v, a)
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_channel(a),
            ..self
        }
    }

    /// Component-wise interpolation, `t` clamped to `0..=1`
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Normalized linear-space RGBA for an sRGB render target
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r / 255.0),
            srgb_to_linear(self.g / 255.0),
            srgb_to_linear(self.b / 255.0),
            self.a / 255.0,
        ]
    }
}

fn clamp_channel(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 255.0)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Shared color palette
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::hex(0x010711);
    pub const DARK_GRAY: Color = Color::hex(0x13171F);
    pub const MEDIUM_GRAY: Color = Color::hex(0x1C2026);
    pub const LIGHT_GRAY: Color = Color::hex(0x24272D);
    pub const LIGHTER_GRAY: Color = Color::hex(0x949BA2);
    pub const RED: Color = Color::hex(0x94152A);
    pub const DULL_WHITE: Color = Color::hex(0xB6B6B6);
}

/// Fill/stroke state captured with every command
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_weight: 1.0,
        }
    }
}

impl Style {
    fn is_visible(&self) -> bool {
        self.fill.is_some() || self.stroke.is_some()
    }
}

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Color),
    /// Ellipse given by center and diameters
    Ellipse {
        center: Vec2,
        size: Vec2,
        style: Style,
    },
    Line {
        from: Vec2,
        to: Vec2,
        style: Style,
    },
    /// Rectangle given by a corner and a (possibly negative) extent
    Rect {
        origin: Vec2,
        size: Vec2,
        style: Style,
    },
    Point {
        at: Vec2,
        style: Style,
    },
    /// Open path; `curved` paths are Catmull-Rom splines where the first
    /// and last vertices act only as control points
    Shape {
        vertices: Vec<Vec2>,
        curved: bool,
        style: Style,
    },
}

impl DrawCommand {
    fn is_finite(&self) -> bool {
        match self {
            DrawCommand::Clear(_) => true,
            DrawCommand::Ellipse { center, size, style } => {
                center.is_finite() && size.is_finite() && style.stroke_weight.is_finite()
            }
            DrawCommand::Line { from, to, style } => {
                from.is_finite() && to.is_finite() && style.stroke_weight.is_finite()
            }
            DrawCommand::Rect {
                origin,
                size,
                style,
            } => origin.is_finite() && size.is_finite() && style.stroke_weight.is_finite(),
            DrawCommand::Point { at, style } => at.is_finite() && style.stroke_weight.is_finite(),
            DrawCommand::Shape {
                vertices, style, ..
            } => vertices.iter().all(|v| v.is_finite()) && style.stroke_weight.is_finite(),
        }
    }
}

struct ShapeBuilder {
    vertices: Vec<Vec2>,
    curved: bool,
}

/// Drawing surface shared by every visualization within a frame
pub struct Canvas {
    width: f32,
    height: f32,
    frame_count: u64,
    style: Style,
    shape: Option<ShapeBuilder>,
    commands: Vec<DrawCommand>,
    rng: StdRng,
}

impl Canvas {
    /// Create a canvas; a fixed `seed` makes `random` reproducible
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            width,
            height,
            frame_count: 0,
            style: Style::default(),
            shape: None,
            commands: Vec::new(),
            rng,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of frames begun so far (1 during the first frame)
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Size the canvas for a surface of `width` x `height` pixels at
    /// `scale` surface pixels per canvas unit
    pub fn fit_surface(&mut self, width: u32, height: u32, scale: f32) {
        self.resize(width as f32 / scale, height as f32 / scale);
    }

    /// Start a new frame: bump the frame counter, restore default style,
    /// drop last frame's commands and clear to `background`
    pub fn begin_frame(&mut self, background: Color) {
        self.frame_count += 1;
        self.style = Style::default();
        self.shape = None;
        self.commands.clear();
        self.background(background);
    }

    pub fn background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, color: Color) {
        self.style.stroke = Some(color);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight;
    }

    /// Ellipse centered on `(x, y)` with diameters `w` and `h`
    pub fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push(DrawCommand::Ellipse {
            center: Vec2::new(x, y),
            size: Vec2::new(w, h),
            style: self.style,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(DrawCommand::Line {
            from: Vec2::new(x1, y1),
            to: Vec2::new(x2, y2),
            style: self.style,
        });
    }

    /// Rectangle with its corner at `(x, y)`; negative extents grow left/up
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push(DrawCommand::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
            style: self.style,
        });
    }

    pub fn point(&mut self, x: f32, y: f32) {
        self.push(DrawCommand::Point {
            at: Vec2::new(x, y),
            style: self.style,
        });
    }

    pub fn begin_shape(&mut self) {
        self.shape = Some(ShapeBuilder {
            vertices: Vec::new(),
            curved: false,
        });
    }

    pub fn vertex(&mut self, x: f32, y: f32) {
        if let Some(shape) = self.shape.as_mut() {
            shape.vertices.push(Vec2::new(x, y));
        }
    }

    pub fn curve_vertex(&mut self, x: f32, y: f32) {
        if let Some(shape) = self.shape.as_mut() {
            shape.curved = true;
            shape.vertices.push(Vec2::new(x, y));
        }
    }

    pub fn end_shape(&mut self) {
        let Some(shape) = self.shape.take() else {
            return;
        };
        let min_vertices = if shape.curved { 4 } else { 2 };
        if shape.vertices.len() < min_vertices {
            return;
        }
        self.push(DrawCommand::Shape {
            vertices: shape.vertices,
            curved: shape.curved,
            style: self.style,
        });
    }

    /// Uniform random value between `a` and `b` (either order), upper bound
    /// exclusive
    pub fn random(&mut self, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        lo + self.rng.random::<f32>() * (hi - lo)
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Drop every command recorded after the first `len`
    pub fn truncate_commands(&mut self, len: usize) {
        self.commands.truncate(len);
        self.shape = None;
    }

    /// Hand the recorded frame to the caller, leaving the canvas empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Non-finite geometry is dropped rather than drawn
    fn push(&mut self, command: DrawCommand) {
        let visible = match &command {
            DrawCommand::Clear(_) => true,
            DrawCommand::Ellipse { style, .. }
            | DrawCommand::Rect { style, .. }
            | DrawCommand::Shape { style, .. } => style.is_visible(),
            DrawCommand::Line { style, .. } | DrawCommand::Point { style, .. } => {
                style.stroke.is_some()
            }
        };
        if !visible {
            return;
        }
        if !command.is_finite() {
            log::trace!("dropping non-finite draw command: {:?}", command);
            return;
        }
        self.commands.push(command);
    }
}

/// Re-map `value` from `[start1, stop1]` to `[start2, stop2]` without clamping
#[inline]
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}
