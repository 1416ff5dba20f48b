//! Pairing of a visualization with its trigger and activation state.

use crate::audio::AudioFrame;
use crate::canvas::Canvas;
use crate::visualization::Visualization;

/// One keyboard-triggered entry on the soundboard
pub struct VisualizationDefinition {
    /// Stable identifier, e.g. `lock-groove-6`
    pub id: String,
    /// Legacy key code that toggles this entry
    pub key_code: u32,
    /// Icon shown on the trigger button
    pub display_icon: String,
    viz: Box<dyn Visualization>,
    active: bool,
}

impl VisualizationDefinition {
    pub fn new(
        id: impl Into<String>,
        key_code: u32,
        display_icon: impl Into<String>,
        viz: Box<dyn Visualization>,
    ) -> Self {
        Self {
            id: id.into(),
            key_code,
            display_icon: display_icon.into(),
            viz,
            active: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Flip the active flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn visualization(&self) -> &dyn Visualization {
        self.viz.as_ref()
    }

    pub fn visualization_mut(&mut self) -> &mut dyn Visualization {
        self.viz.as_mut()
    }

    /// Draw this entry for the current frame.
    ///
    /// Inactive entries draw nothing. Active entries draw when the frame
    /// carries any signal (non-zero level or a non-empty spectrum); a
    /// non-finite level counts as a dropped sample and skips the frame.
    pub fn visualize(&mut self, frame: &AudioFrame, canvas: &mut Canvas) {
        if !self.is_playing() {
            return;
        }

        let level = frame.level;
        if !level.is_finite() {
            log::trace!("{}: skipping frame with level {}", self.id, level);
            return;
        }

        if level != 0.0 || !frame.spectrum.is_empty() {
            canvas.no_fill();
            self.viz.visualize(level, &frame.spectrum, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::visualization::VisualizationKind;

    fn definition(kind: VisualizationKind, canvas: &mut Canvas) -> VisualizationDefinition {
        VisualizationDefinition::new("test", 48, "images/icon-1.svg", kind.build(canvas))
    }

    fn frame(level: f32, spectrum: Vec<f32>) -> AudioFrame {
        AudioFrame { level, spectrum }
    }

    #[test]
    fn test_inactive_definition_draws_nothing() {
        let mut canvas = Canvas::new(800.0, 600.0, Some(3));
        canvas.begin_frame(Color::BLACK);
        let kinds = [
            VisualizationKind::Spectrum,
            VisualizationKind::LineVibration,
            VisualizationKind::RotatingWave,
        ];
        for kind in kinds {
            let mut def = definition(kind, &mut canvas);
            for f in [frame(0.0, vec![]), frame(0.7, vec![200.0; 1024])] {
                def.visualize(&f, &mut canvas);
            }
        }
        assert_eq!(canvas.command_count(), 1);
    }

    #[test]
    fn test_active_definition_needs_signal() {
        let mut canvas = Canvas::new(800.0, 600.0, Some(3));
        canvas.begin_frame(Color::BLACK);
        let mut def = definition(VisualizationKind::LineVibration, &mut canvas);
        def.toggle();

        def.visualize(&frame(0.0, vec![]), &mut canvas);
        assert_eq!(canvas.command_count(), 1);

        def.visualize(&frame(f32::NAN, vec![1.0]), &mut canvas);
        assert_eq!(canvas.command_count(), 1);

        def.visualize(&frame(0.0, vec![0.0; 16]), &mut canvas);
        assert_eq!(canvas.command_count(), 2);
    }

    #[test]
    fn test_visualize_starts_without_fill() {
        let mut canvas = Canvas::new(800.0, 600.0, Some(3));
        canvas.begin_frame(Color::BLACK);
        let mut def = definition(VisualizationKind::Arc, &mut canvas);
        def.set_active(true);
        def.visualize(&frame(0.2, vec![]), &mut canvas);
        assert_eq!(canvas.style().fill, None);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut canvas = Canvas::new(800.0, 600.0, Some(3));
        let mut def = definition(VisualizationKind::Helix, &mut canvas);
        assert!(!def.is_playing());
        assert!(def.toggle());
        assert!(!def.toggle());
    }
}
