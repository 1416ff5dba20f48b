//! Error type shared by the audio, rendering and configuration layers.

use thiserror::Error;

/// Errors raised while bringing up or running the soundboard
#[derive(Debug, Error)]
pub enum SoundboardError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No audio input device found")]
    NoInputDevice,

    #[error("Failed to query audio input config: {0}")]
    InputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Recording failed: {0}")]
    Recording(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SoundboardError>;
