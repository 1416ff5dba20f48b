//! Audio analysis configuration.

use crate::error::{Result, SoundboardError};

/// Spectrum and level analysis configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Preferred capture sample rate (Hz); the device default is used when
    /// the input cannot run at this rate
    pub preferred_sample_rate_hz: u32,

    /// FFT window size (must be power of 2); the spectrum has half as many bins
    pub fft_size: usize,

    /// Temporal smoothing of bin magnitudes (0 = none, must be below 1)
    pub smoothing: f32,

    /// Magnitude (dB) mapped to spectrum value 0
    pub min_db: f32,

    /// Magnitude (dB) mapped to spectrum value 255
    pub max_db: f32,

    /// Decay applied to the level meter between updates (0 = raw RMS)
    pub level_smoothing: f32,

    /// Analysis thread update interval (milliseconds)
    /// 16 ≈ one update per 60 Hz frame
    pub update_interval_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            preferred_sample_rate_hz: 48_000,
            fft_size: 2048,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            level_smoothing: 0.0,
            update_interval_ms: 16,
        }
    }
}

impl AnalyzerConfig {
    /// Number of spectrum bins produced per analysis
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(SoundboardError::Config(format!(
                "FFT size must be a power of 2 of at least 32, got {}",
                self.fft_size
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(SoundboardError::Config(format!(
                "Spectrum smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }
        if !(0.0..1.0).contains(&self.level_smoothing) {
            return Err(SoundboardError::Config(format!(
                "Level smoothing must be in [0, 1), got {}",
                self.level_smoothing
            )));
        }
        if self.min_db >= self.max_db {
            return Err(SoundboardError::Config(format!(
                "min_db ({}) must be below max_db ({})",
                self.min_db, self.max_db
            )));
        }
        if self.preferred_sample_rate_hz == 0 {
            return Err(SoundboardError::Config("Sample rate must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 1024);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = AnalyzerConfig {
            fft_size: 1000,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());

        config.fft_size = 1024;
        config.smoothing = 1.0;
        assert!(config.validate().is_err());

        config.smoothing = 0.5;
        config.min_db = -10.0;
        assert!(matches!(
            config.validate(),
            Err(SoundboardError::Config(_))
        ));
    }
}
