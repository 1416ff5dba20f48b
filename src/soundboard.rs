//! Frame driver and key dispatch.
//!
//! The [`Soundboard`] owns every visualization definition and the trigger
//! board that mirrors their state. Each redraw it clears the canvas and asks
//! the definitions, in insertion order, to draw the latest audio frame.

use glam::Vec2;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::audio::AudioFrame;
use crate::canvas::{palette, Canvas, Color, DrawCommand};
use crate::definition::VisualizationDefinition;
use crate::input::{TriggerBinding, TriggerBoard, STOP_ALL_KEY_CODE};
use crate::layout::{radial_layout, ButtonPlacement};
use crate::params::LayoutConfig;

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Toggled { id: String, active: bool },
    StoppedAll,
    Ignored,
}

pub struct Soundboard {
    definitions: Vec<VisualizationDefinition>,
    /// Set once a definition has panicked; it is skipped until toggled again
    faulted: Vec<bool>,
    board: TriggerBoard,
    placements: Vec<ButtonPlacement>,
    layout: LayoutConfig,
    background: Color,
}

impl Soundboard {
    /// Build one definition per binding, in table order
    pub fn new(
        bindings: &[TriggerBinding],
        canvas: &mut Canvas,
        layout: LayoutConfig,
        background: Color,
    ) -> Self {
        let definitions = bindings
            .iter()
            .map(|b| {
                VisualizationDefinition::new(b.id, b.key_code, b.display_icon, b.kind.build(canvas))
            })
            .collect();
        Self::from_definitions(definitions, layout, background)
    }

    pub fn from_definitions(
        definitions: Vec<VisualizationDefinition>,
        layout: LayoutConfig,
        background: Color,
    ) -> Self {
        let board = TriggerBoard::new(definitions.iter().map(|d| (d.id.as_str(), d.key_code)));
        let placements = radial_layout(definitions.len(), &layout);
        Self {
            faulted: vec![false; definitions.len()],
            definitions,
            board,
            placements,
            layout,
            background,
        }
    }

    pub fn definitions(&self) -> &[VisualizationDefinition] {
        &self.definitions
    }

    pub fn board(&self) -> &TriggerBoard {
        &self.board
    }

    pub fn placements(&self) -> &[ButtonPlacement] {
        &self.placements
    }

    pub fn any_active(&self) -> bool {
        self.definitions.iter().any(|d| d.is_playing())
    }

    /// Toggle whatever `key_code` is bound to, or stop everything for the
    /// stop-all key
    pub fn handle_key(&mut self, key_code: u32) -> KeyOutcome {
        if key_code == STOP_ALL_KEY_CODE {
            self.stop_all();
            return KeyOutcome::StoppedAll;
        }

        let mut outcome = KeyOutcome::Ignored;
        for (definition, faulted) in self
            .definitions
            .iter_mut()
            .zip(&mut self.faulted)
            .filter(|(d, _)| d.key_code == key_code)
        {
            let active = definition.toggle();
            *faulted = false;
            log::debug!("{} -> {}", definition.id, if active { "on" } else { "off" });
            if outcome == KeyOutcome::Ignored {
                outcome = KeyOutcome::Toggled {
                    id: definition.id.clone(),
                    active,
                };
            }
        }
        self.board.toggle(key_code);
        outcome
    }

    pub fn stop_all(&mut self) {
        for definition in &mut self.definitions {
            definition.set_active(false);
        }
        self.board.deactivate_all();
        log::info!("All visualizations stopped");
    }

    /// Restore every visualization's initial state. No key is bound to this.
    pub fn reset_all(&mut self) {
        for definition in &mut self.definitions {
            definition.visualization_mut().reset();
        }
    }

    /// Recompute button positions, e.g. after a resize
    pub fn relayout(&mut self, layout: LayoutConfig) {
        self.placements = radial_layout(self.definitions.len(), &layout);
        self.layout = layout;
    }

    /// Draw one frame of every active visualization.
    ///
    /// A panicking definition loses whatever it drew this frame and is
    /// skipped until its key toggles it again; the remaining definitions
    /// still draw.
    pub fn render_frame(&mut self, canvas: &mut Canvas, frame: &AudioFrame) -> Vec<DrawCommand> {
        canvas.begin_frame(self.background);

        for (definition, faulted) in self.definitions.iter_mut().zip(&mut self.faulted) {
            if *faulted {
                continue;
            }

            let mark = canvas.command_count();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                definition.visualize(frame, canvas);
            }));

            if let Err(payload) = result {
                canvas.truncate_commands(mark);
                log::error!(
                    "Visualization {} ({}) failed, skipping until toggled: {}",
                    definition.id,
                    definition.visualization().name(),
                    panic_message(payload.as_ref())
                );
                *faulted = true;
            }
        }

        canvas.take_commands()
    }

    /// Draw the trigger board, centred on the canvas
    pub fn draw_board(&self, canvas: &mut Canvas) {
        let center = Vec2::new(canvas.width() / 2.0, canvas.height() / 2.0);
        let size = self.layout.button_size_px;

        canvas.no_fill();
        canvas.stroke_weight(2.0);
        canvas.stroke(if self.board.is_active() {
            palette::DULL_WHITE
        } else {
            palette::MEDIUM_GRAY
        });
        canvas.ellipse(center.x, center.y, size, size);

        for (button, placement) in self.board.buttons().iter().zip(&self.placements) {
            let at = placement.position(center);
            canvas.stroke(palette::LIGHTER_GRAY);
            canvas.fill(if button.is_active() {
                palette::RED
            } else {
                palette::LIGHT_GRAY
            });
            canvas.ellipse(at.x, at.y, size, size);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
