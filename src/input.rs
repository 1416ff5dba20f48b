//! Keyboard bindings and trigger button state.
//!
//! Keys are identified by their legacy DOM key codes (`'0'` is 48, `'='`
//! is 187) so the binding table reads the same regardless of the windowing
//! backend; [`key_code_for`] translates `winit` physical keys.

use winit::keyboard::KeyCode;

use crate::visualization::VisualizationKind;

/// Key that deactivates every visualization at once (`=`/`+`)
pub const STOP_ALL_KEY_CODE: u32 = 187;

/// Static configuration of one trigger
#[derive(Debug, Clone, Copy)]
pub struct TriggerBinding {
    pub id: &'static str,
    pub key_code: u32,
    pub display_icon: &'static str,
    pub kind: VisualizationKind,
}

const fn binding(
    id: &'static str,
    key_code: u32,
    display_icon: &'static str,
    kind: VisualizationKind,
) -> TriggerBinding {
    TriggerBinding {
        id,
        key_code,
        display_icon,
        kind,
    }
}

/// Default trigger table, in board order
pub const DEFAULT_BINDINGS: &[TriggerBinding] = &[
    binding("lock-groove-1", 48, "images/icon-1.svg", VisualizationKind::Ellipse),
    binding("lock-groove-2", 49, "images/icon-2.svg", VisualizationKind::LineVibration),
    binding("lock-groove-4", 50, "images/icon-4.svg", VisualizationKind::Amp),
    binding("lock-groove-5", 51, "images/icon-5.svg", VisualizationKind::Spectrum),
    binding("lock-groove-6", 52, "images/icon-6.svg", VisualizationKind::Radial),
    binding("lock-groove-7", 53, "images/icon-7.svg", VisualizationKind::ParticleScurry),
    binding("lock-groove-8", 54, "images/icon-8.svg", VisualizationKind::Curve),
    binding("lock-groove-9", 55, "images/icon-9.svg", VisualizationKind::Helix),
    binding("lock-groove-10", 56, "images/icon-10.svg", VisualizationKind::StationaryCircle),
    binding("lock-groove-11", 57, "images/icon-11.svg", VisualizationKind::Flower),
    binding("arc", 81, "images/icon-arc.svg", VisualizationKind::Arc),
    binding("spiral", 87, "images/icon-spiral.svg", VisualizationKind::Spiral),
    binding("snow", 69, "images/icon-snow.svg", VisualizationKind::Snow),
    binding("rotating-wave", 82, "images/icon-wave.svg", VisualizationKind::RotatingWave),
];

/// Legacy key code for a physical key, if it is one the board can bind
pub fn key_code_for(key: KeyCode) -> Option<u32> {
    let code = match key {
        KeyCode::Digit0 => 48,
        KeyCode::Digit1 => 49,
        KeyCode::Digit2 => 50,
        KeyCode::Digit3 => 51,
        KeyCode::Digit4 => 52,
        KeyCode::Digit5 => 53,
        KeyCode::Digit6 => 54,
        KeyCode::Digit7 => 55,
        KeyCode::Digit8 => 56,
        KeyCode::Digit9 => 57,
        KeyCode::KeyE => 69,
        KeyCode::KeyQ => 81,
        KeyCode::KeyR => 82,
        KeyCode::KeyW => 87,
        KeyCode::Equal => 187,
        _ => return None,
    };
    Some(code)
}

/// Visual state of one on-screen trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerButton {
    pub id: String,
    pub key_code: u32,
    active: bool,
}

impl TriggerButton {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The set of trigger buttons shown on the board
#[derive(Debug, Clone, Default)]
pub struct TriggerBoard {
    buttons: Vec<TriggerButton>,
}

impl TriggerBoard {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let buttons = entries
            .into_iter()
            .map(|(id, key_code)| TriggerButton {
                id: id.to_string(),
                key_code,
                active: false,
            })
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[TriggerButton] {
        &self.buttons
    }

    /// Flip the button bound to `key_code`; `None` when no button matches
    pub fn toggle(&mut self, key_code: u32) -> Option<bool> {
        let button = self.buttons.iter_mut().find(|b| b.key_code == key_code)?;
        button.active = !button.active;
        Some(button.active)
    }

    pub fn deactivate_all(&mut self) {
        for button in &mut self.buttons {
            button.active = false;
        }
    }

    /// The board is lit while any trigger is lit
    pub fn is_active(&self) -> bool {
        self.buttons.iter().any(|b| b.active)
    }
}
