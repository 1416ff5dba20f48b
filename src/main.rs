//! Soundboard - keyboard-triggered audio-reactive visuals
//!
//! Number keys (and Q/W/E/R) toggle visualizations that react to the
//! microphone; `=` stops them all, ESC quits.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use soundboard::audio::{AudioSource, AudioSystem, Silence};
use soundboard::canvas::Canvas;
use soundboard::cli::Args;
use soundboard::input::{key_code_for, DEFAULT_BINDINGS};
use soundboard::params::{AnalyzerConfig, LayoutConfig, RecordingConfig, RenderConfig};
use soundboard::rendering::{Mesh, RenderSystem};
use soundboard::soundboard::{KeyOutcome, Soundboard};

/// Everything that needs a window to exist
struct Scene {
    window: Arc<Window>,
    render_system: RenderSystem,
    canvas: Canvas,
    soundboard: Soundboard,
    /// Surface pixels per canvas unit
    scale: f32,
}

impl Scene {
    fn resize(&mut self, width: u32, height: u32) {
        self.render_system.resize(width, height);
        self.canvas.fit_surface(width, height, self.scale);
        self.soundboard.relayout(LayoutConfig::default());
    }
}

/// Main application state
struct App {
    // Configuration
    render_config: RenderConfig,
    analyzer_config: AnalyzerConfig,
    recording_config: Option<RecordingConfig>,

    scene: Option<Scene>,
    audio: Option<Box<dyn AudioSource>>,
    mesh: Mesh,
    frame_num: usize,

    /// Startup failure, reported once the event loop returns
    error: Option<anyhow::Error>,
}

impl App {
    fn new(
        render_config: RenderConfig,
        analyzer_config: AnalyzerConfig,
        recording_config: Option<RecordingConfig>,
    ) -> Self {
        Self {
            render_config,
            analyzer_config,
            recording_config,
            scene: None,
            audio: None,
            mesh: Mesh::new(),
            frame_num: 0,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Soundboard")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.recording_config.clone(),
        ))
        .context("Failed to initialize rendering")?;

        let scale = self
            .render_config
            .pixel_density
            .unwrap_or(window.scale_factor() as f32);
        let (width, height) = render_system.size();
        let mut canvas = Canvas::new(
            width as f32 / scale,
            height as f32 / scale,
            self.render_config.seed,
        );
        let soundboard = Soundboard::new(
            DEFAULT_BINDINGS,
            &mut canvas,
            LayoutConfig::default(),
            self.render_config.background,
        );

        let audio: Box<dyn AudioSource> =
            match AudioSystem::new(self.analyzer_config.clone(), self.recording_config.as_ref()) {
                Ok(audio) => Box::new(audio),
                Err(e) if self.recording_config.is_none() => {
                    log::warn!("Audio input unavailable ({e}); visuals will stay silent");
                    Box::new(Silence)
                }
                Err(e) => return Err(e).context("Recording needs a working audio input"),
            };

        log::info!(
            "Soundboard running: {}x{} canvas at {:.1}x, {} visualizations",
            canvas.width(),
            canvas.height(),
            scale,
            soundboard.definitions().len()
        );
        log::info!("Press ESC to quit");

        self.scene = Some(Scene {
            window,
            render_system,
            canvas,
            soundboard,
            scale,
        });
        self.audio = Some(audio);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let (Some(scene), Some(audio)) = (self.scene.as_mut(), self.audio.as_ref()) else {
            return;
        };

        // First gesture unlocks the input stream
        if let Err(e) = audio.resume() {
            log::warn!("Failed to resume audio input: {e}");
        }

        let Some(code) = key_code_for(key) else {
            return;
        };
        match scene.soundboard.handle_key(code) {
            KeyOutcome::Toggled { id, active } => {
                log::info!("{id} {}", if active { "on" } else { "off" });
            }
            KeyOutcome::StoppedAll | KeyOutcome::Ignored => {}
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(scene), Some(audio)) = (self.scene.as_mut(), self.audio.as_ref()) else {
            return;
        };

        let frame = audio.frame();
        let commands = scene.soundboard.render_frame(&mut scene.canvas, &frame);

        self.mesh.clear();
        self.mesh.extend(&commands, scene.scale);
        if self.render_config.show_board {
            scene.soundboard.draw_board(&mut scene.canvas);
            let board = scene.canvas.take_commands();
            self.mesh.extend(&board, scene.scale);
        }

        match scene.render_system.render(&self.mesh, self.frame_num) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = scene.window.inner_size();
                scene.resize(size.width, size.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {e:?}"),
        }

        if let Some(ref config) = self.recording_config {
            self.frame_num += 1;
            if self.frame_num % config.fps as usize == 0 {
                log::info!(
                    "Recorded {}/{} frames",
                    self.frame_num,
                    config.total_frames()
                );
            }
            if self.frame_num >= config.total_frames() {
                log::info!("Recording complete: {}", config.output_dir);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = &self.scene {
            scene.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return; // Already initialized
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(scene) = self.scene.as_mut() {
                    if self.render_config.pixel_density.is_none() {
                        scene.scale = scale_factor as f32;
                        let size = scene.window.inner_size();
                        scene.resize(size.width, size.height);
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let render_config = args.render_config();
    let analyzer_config = args.analyzer_config();
    render_config.validate()?;
    analyzer_config.validate()?;

    let recording_config = args.recording_config();
    if let Some(ref config) = recording_config {
        std::fs::create_dir_all(config.frames_dir())
            .with_context(|| format!("Failed to create {}", config.frames_dir()))?;
        log::info!(
            "Recording {:.1}s ({} frames) to {}",
            config.duration_secs,
            config.total_frames(),
            config.output_dir
        );
    }

    let mut app = App::new(render_config, analyzer_config, recording_config);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
