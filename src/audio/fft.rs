//! Spectrum and level analysis of the captured signal.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use super::AudioFrame;
use crate::params::AnalyzerConfig;

/// Blackman window coefficient for `index` of `size` (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

/// Turns a window of samples into a smoothed 0..255 magnitude spectrum
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl SpectrumAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(size),
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.bin_count()],
            smoothing: config.smoothing,
            min_db: config.min_db,
            max_db: config.max_db,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    /// Analyse the newest `fft_size` samples.
    ///
    /// Shorter input is zero-padded in front, so the latest sample always
    /// sits at the end of the window. Non-finite samples count as silence.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let size = self.fft_size();
        let tail = &samples[samples.len().saturating_sub(size)..];
        let pad = size - tail.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { tail[i - pad] };
            let sample = if sample.is_finite() { sample } else { 0.0 };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let scale = 255.0 / (self.max_db - self.min_db);
        self.smoothed
            .iter_mut()
            .zip(&self.buffer)
            .map(|(smoothed, bin)| {
                let magnitude = bin.norm() / size as f32;
                *smoothed = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;
                let db = 20.0 * smoothed.log10();
                ((db - self.min_db) * scale).clamp(0.0, 255.0).floor()
            })
            .collect()
    }
}

/// RMS loudness with peak-hold decay
#[derive(Debug, Clone, Default)]
pub struct LevelMeter {
    smoothing: f32,
    volume: f32,
}

impl LevelMeter {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing,
            volume: 0.0,
        }
    }

    pub fn update(&mut self, samples: &[f32]) -> f32 {
        let (sum, count) = samples
            .iter()
            .filter(|s| s.is_finite())
            .fold((0.0f32, 0usize), |(sum, n), s| (sum + s * s, n + 1));
        let rms = if count == 0 {
            0.0
        } else {
            (sum / count as f32).sqrt()
        };
        self.volume = rms.max(self.volume * self.smoothing);
        self.volume
    }

    pub fn level(&self) -> f32 {
        self.volume
    }
}

/// Spawn the analysis thread.
///
/// Every `update_interval_ms` it copies the newest window out of `samples`,
/// analyses it and publishes the result into `frame`, until `running` is
/// cleared.
pub(super) fn spawn_analysis_thread(
    config: AnalyzerConfig,
    samples: Arc<Mutex<Vec<f32>>>,
    frame: Arc<Mutex<AudioFrame>>,
    running: Arc<AtomicBool>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("audio-analysis".into())
        .spawn(move || {
            let mut analyzer = SpectrumAnalyzer::new(&config);
            let mut meter = LevelMeter::new(config.level_smoothing);
            let mut window = Vec::with_capacity(config.fft_size);

            while running.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(config.update_interval_ms));

                window.clear();
                {
                    let buf = samples.lock().unwrap_or_else(PoisonError::into_inner);
                    let start = buf.len().saturating_sub(config.fft_size);
                    window.extend_from_slice(&buf[start..]);
                }

                let spectrum = analyzer.analyze(&window);
                let level = meter.update(&window);

                *frame.lock().unwrap_or_else(PoisonError::into_inner) =
                    AudioFrame { level, spectrum };
            }
            log::debug!("Audio analysis thread stopped");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sine(bin: usize, amplitude: f32, size: usize) -> Vec<f32> {
        (0..size)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    fn unsmoothed() -> AnalyzerConfig {
        AnalyzerConfig {
            smoothing: 0.0,
            ..AnalyzerConfig::default()
        }
    }

    #[test]
    fn test_blackman_window() {
        let size = 1024;
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert_relative_eq!(blackman_window(size / 2, size), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            blackman_window(size / 4, size),
            blackman_window(3 * size / 4, size),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_spectrum_has_half_window_bins_in_byte_range() {
        let config = unsmoothed();
        let mut analyzer = SpectrumAnalyzer::new(&config);
        let spectrum = analyzer.analyze(&sine(100, 1.0, config.fft_size));
        assert_eq!(spectrum.len(), 1024);
        assert!(spectrum.iter().all(|v| (0.0..=255.0).contains(v)));
        assert_eq!(spectrum[100], 255.0);
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyzer = SpectrumAnalyzer::new(&AnalyzerConfig::default());
        assert!(analyzer.analyze(&[]).iter().all(|&v| v == 0.0));
        assert!(analyzer.analyze(&vec![0.0; 4096]).iter().all(|&v| v == 0.0));
        assert!(analyzer.analyze(&[f32::NAN; 8]).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let config = unsmoothed();
        let mut analyzer = SpectrumAnalyzer::new(&config);
        let spectrum = analyzer.analyze(&sine(64, 0.01, config.fft_size));

        let peak = spectrum
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        assert_eq!(peak.0, 64);
        assert!(peak.1 > 0.0 && peak.1 < 255.0);
        assert!(spectrum[64] > spectrum[65]);
        assert_eq!(spectrum[400], 0.0);
    }

    #[test]
    fn test_smoothing_decays_instead_of_dropping() {
        let config = AnalyzerConfig::default();
        let mut analyzer = SpectrumAnalyzer::new(&config);
        let loud = analyzer.analyze(&sine(64, 0.01, config.fft_size));
        let after = analyzer.analyze(&vec![0.0; config.fft_size]);
        assert!(after[64] > 0.0);
        assert!(after[64] < loud[64]);
    }

    #[test]
    fn test_level_meter_rms() {
        let mut meter = LevelMeter::new(0.0);
        assert_relative_eq!(meter.update(&[0.5; 256]), 0.5);
        assert_relative_eq!(meter.update(&sine(8, 1.0, 1024)), 0.70710677, epsilon = 1e-4);
        assert_eq!(meter.update(&[]), 0.0);
    }

    #[test]
    fn test_level_meter_holds_peak() {
        let mut meter = LevelMeter::new(0.5);
        meter.update(&[0.8; 64]);
        assert_relative_eq!(meter.update(&[0.0; 64]), 0.4);
        assert_relative_eq!(meter.level(), 0.4);
    }

    #[test]
    fn test_analysis_thread_publishes_frames() {
        let config = AnalyzerConfig {
            update_interval_ms: 1,
            ..AnalyzerConfig::default()
        };
        let samples = Arc::new(Mutex::new(vec![0.5; config.fft_size]));
        let frame = Arc::new(Mutex::new(AudioFrame::default()));
        let running = Arc::new(AtomicBool::new(true));

        let handle = spawn_analysis_thread(
            config,
            Arc::clone(&samples),
            Arc::clone(&frame),
            Arc::clone(&running),
        )
        .unwrap();

        let mut published = AudioFrame::default();
        for _ in 0..500 {
            thread::sleep(Duration::from_millis(2));
            published = frame.lock().unwrap().clone();
            if !published.spectrum.is_empty() {
                break;
            }
        }
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        assert_eq!(published.spectrum.len(), 1024);
        assert_relative_eq!(published.level, 0.5);
    }
}
