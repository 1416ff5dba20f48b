//! Radial placement of the trigger buttons.
//!
//! Buttons are split into rings of `group_size`. Within a ring they are
//! spread evenly around the board centre, starting straight up and going
//! clockwise; every other ring is rotated by half a step so the rings
//! interleave.

use glam::Vec2;

use crate::params::LayoutConfig;

/// Where one button sits relative to the board centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPlacement {
    /// Ring index, innermost first
    pub layer: usize,
    /// Position within the ring
    pub index: usize,
    /// Ring parity flag; the first ring counts as odd
    pub odd_layer: bool,
    /// Clockwise rotation from straight up (degrees)
    pub angle_deg: f32,
    /// Distance from the board centre (pixels)
    pub radius_px: f32,
}

impl ButtonPlacement {
    /// Offset from the board centre in screen space (y down)
    pub fn offset(&self) -> Vec2 {
        let angle = self.angle_deg.to_radians();
        Vec2::new(angle.sin(), -angle.cos()) * self.radius_px
    }

    /// Absolute button centre for a board centred at `center`
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + self.offset()
    }
}

/// Lay out `count` buttons in board order
pub fn radial_layout(count: usize, config: &LayoutConfig) -> Vec<ButtonPlacement> {
    let group_size = config.group_size.max(1);
    let mut placements = Vec::with_capacity(count);

    for (layer, start) in (0..count).step_by(group_size).enumerate() {
        let items = group_size.min(count - start);
        let step = 360.0 / items as f32;
        let stagger = if layer % 2 == 1 { step / 2.0 } else { 0.0 };
        let radius_px = config.base_radius_px + config.layer_depth_px * layer as f32;

        for index in 0..items {
            placements.push(ButtonPlacement {
                layer,
                index,
                odd_layer: (start + 1) % 2 == 1,
                angle_deg: step * index as f32 + stagger,
                radius_px,
            });
        }
    }

    placements
}
