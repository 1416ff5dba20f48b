//! Live microphone capture feeding the analysis thread.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SizedSample, Stream, StreamConfig};
use std::fs::File;
use std::io::BufWriter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use super::fft::spawn_analysis_thread;
use super::{AudioFrame, AudioSource};
use crate::error::{Result, SoundboardError};
use crate::params::{AnalyzerConfig, RecordingConfig};

type WavSink = Arc<Mutex<Option<hound::WavWriter<BufWriter<File>>>>>;

/// Audio system managing capture and analysis
pub struct AudioSystem {
    /// Latest analysed frame (thread-safe)
    frame: Arc<Mutex<AudioFrame>>,

    /// Input stream (kept alive)
    stream: Stream,

    /// Optional WAV sink for recording mode
    wav: WavSink,

    running: Arc<AtomicBool>,
    analysis_thread: Option<thread::JoinHandle<()>>,
}

impl AudioSystem {
    /// Open the default input device and start capturing and analysing
    pub fn new(config: AnalyzerConfig, recording: Option<&RecordingConfig>) -> Result<Self> {
        config.validate()?;

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(SoundboardError::NoInputDevice)?;

        log::info!(
            "Audio input: {}",
            device.name().unwrap_or_else(|_| "unknown".into())
        );

        let supported = device.default_input_config()?;

        // Run at the preferred rate when some supported range covers it with
        // the default channel count, otherwise take the device default.
        let preferred = cpal::SampleRate(config.preferred_sample_rate_hz);
        let preferred_config = device.supported_input_configs().ok().and_then(|configs| {
            configs
                .filter(|c| {
                    c.channels() == supported.channels()
                        && c.min_sample_rate() <= preferred
                        && c.max_sample_rate() >= preferred
                })
                .max_by_key(|c| c.max_sample_rate())
                .map(|c| c.with_sample_rate(preferred))
        });
        let chosen = preferred_config.unwrap_or(supported);

        let sample_rate = chosen.sample_rate().0;
        let format = chosen.sample_format();
        let stream_config: StreamConfig = chosen.into();

        log::info!(
            "Capture config: {}Hz  {} ch  {:?}",
            sample_rate,
            stream_config.channels,
            format
        );

        let wav: WavSink = Arc::new(Mutex::new(None));
        if let Some(recording) = recording {
            std::fs::create_dir_all(&recording.output_dir)?;
            let spec = hound::WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 32,
                sample_format: hound::SampleFormat::Float,
            };
            let writer = hound::WavWriter::create(recording.audio_path(), spec)?;
            *wav.lock().unwrap_or_else(PoisonError::into_inner) = Some(writer);
            log::info!("Recording audio to {}", recording.audio_path());
        }

        // Keep two windows of history so the analyser always sees a full one
        let capacity = config.fft_size * 2;
        let samples = Arc::new(Mutex::new(Vec::<f32>::with_capacity(capacity)));

        let sink = CaptureSink {
            samples: Arc::clone(&samples),
            wav: Arc::clone(&wav),
            capacity,
        };

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, sink, mix_mono_f32)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, sink, mix_mono_i16)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, sink, mix_mono_u16)?,
            other => return Err(SoundboardError::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        let frame = Arc::new(Mutex::new(AudioFrame::default()));
        let running = Arc::new(AtomicBool::new(true));
        let analysis_thread = spawn_analysis_thread(
            config,
            samples,
            Arc::clone(&frame),
            Arc::clone(&running),
        )?;

        Ok(Self {
            frame,
            stream,
            wav,
            running,
            analysis_thread: Some(analysis_thread),
        })
    }

    /// Flush and close the recording WAV file, if one is open
    pub fn finish_recording(&self) -> Result<()> {
        let writer = self
            .wav
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(writer) = writer {
            writer.finalize()?;
            log::info!("Audio recording finalized");
        }
        Ok(())
    }
}

impl AudioSource for AudioSystem {
    fn level(&self) -> f32 {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .level
    }

    fn analyze(&self) -> Vec<f32> {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spectrum
            .clone()
    }

    fn frame(&self) -> AudioFrame {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn resume(&self) -> Result<()> {
        self.stream.play()?;
        Ok(())
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.analysis_thread.take() {
            if handle.join().is_err() {
                log::warn!("Audio analysis thread panicked");
            }
        }
        if let Err(e) = self.finish_recording() {
            log::error!("Failed to finalize audio recording: {e}");
        }
    }
}

/// Where the input callback delivers mono samples
struct CaptureSink {
    samples: Arc<Mutex<Vec<f32>>>,
    wav: WavSink,
    capacity: usize,
}

impl CaptureSink {
    fn push(&self, mono: &[f32]) {
        {
            let mut buf = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
            buf.extend_from_slice(mono);
            let excess = buf.len().saturating_sub(self.capacity);
            buf.drain(..excess);
        }

        let mut wav = self.wav.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(writer) = wav.as_mut() {
            for &sample in mono {
                let _ = writer.write_sample(sample);
            }
        }
    }
}

fn build_stream<T: SizedSample + 'static>(
    device: &cpal::Device,
    config: &StreamConfig,
    sink: CaptureSink,
    mix: fn(&[T], usize) -> Vec<f32>,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| sink.push(&mix(data, channels)),
        |e| log::error!("Audio stream error: {e}"),
        None,
    )?;
    Ok(stream)
}

// Per-format mono mixdown

fn mix_mono_f32(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn mix_mono_i16(data: &[i16], channels: usize) -> Vec<f32> {
    const SCALE: f32 = i16::MAX as f32;
    let channels = channels.max(1);
    data.chunks(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            sum as f32 / (channels as f32 * SCALE)
        })
        .collect()
}

fn mix_mono_u16(data: &[u16], channels: usize) -> Vec<f32> {
    // 0 = -1.0, 32768 = 0.0, 65535 = +1.0
    const MID: f32 = 32768.0;
    let channels = channels.max(1);
    data.chunks(channels)
        .map(|frame| {
            let sum: f32 = frame.iter().map(|&s| (s as f32 - MID) / MID).sum();
            sum / channels as f32
        })
        .collect()
}
