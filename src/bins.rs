//! Spectrum sample access helpers.
//!
//! Spectra arrive with a fixed length from the analyser, but visualizations
//! index fixed bin ranges. Everything here tolerates short or empty input.

/// Number of neighbours taken on the low side of the smoothing window
const NEIGHBORS: usize = 2;

/// Mean of the samples at `index-2 ..= index+1`, clipped to the spectrum.
///
/// Returns 0 when no sample falls inside the window (e.g. an empty
/// spectrum) rather than dividing by zero.
pub fn smooth_point(spectrum: &[f32], index: usize) -> f32 {
    let start = index.saturating_sub(NEIGHBORS);
    let end = index.saturating_add(NEIGHBORS).min(spectrum.len());

    if start >= end {
        return 0.0;
    }

    let window = &spectrum[start..end];
    window.iter().sum::<f32>() / window.len() as f32
}

/// Bin value, or `None` past the end of the spectrum
#[inline]
pub fn bin_at(spectrum: &[f32], index: usize) -> Option<f32> {
    spectrum.get(index).copied()
}

/// Largest value in `values`, 0 for an empty slice
pub fn peak(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .fold(None, |acc: Option<f32>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

/// Sub-slice `start..end` clipped to the spectrum bounds
pub fn clipped(spectrum: &[f32], start: usize, end: usize) -> &[f32] {
    let end = end.min(spectrum.len());
    let start = start.min(end);
    &spectrum[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smooth_point_interior() {
        let spectrum = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // indices 1..=4 -> 2, 3, 4, 5
        assert_relative_eq!(smooth_point(&spectrum, 3), 3.5);
    }

    #[test]
    fn test_smooth_point_clips_edges() {
        let spectrum = [10.0, 20.0, 30.0];
        // index 0: only 0 and 1 are in range
        assert_relative_eq!(smooth_point(&spectrum, 0), 15.0);
        // index 2: window 0..=3 clipped to 0..3
        assert_relative_eq!(smooth_point(&spectrum, 2), 20.0);
        // past the end: index 4 covers 2..=5 -> only 2 remains
        assert_relative_eq!(smooth_point(&spectrum, 4), 30.0);
    }

    #[test]
    fn test_smooth_point_matches_reference_mean() {
        let spectrum: Vec<f32> = (0..32).map(|i| ((i * 37) % 11) as f32).collect();
        for i in 0..40 {
            let lo = i as isize - 2;
            let defined: Vec<f32> = (lo..(i as isize + 2))
                .filter(|&j| j >= 0 && (j as usize) < spectrum.len())
                .map(|j| spectrum[j as usize])
                .collect();
            let expected = if defined.is_empty() {
                0.0
            } else {
                defined.iter().sum::<f32>() / defined.len() as f32
            };
            assert_relative_eq!(smooth_point(&spectrum, i), expected);
        }
    }

    #[test]
    fn test_smooth_point_empty_is_zero() {
        assert_eq!(smooth_point(&[], 0), 0.0);
        assert_eq!(smooth_point(&[], 100), 0.0);
    }

    #[test]
    fn test_smooth_point_huge_index() {
        assert_eq!(smooth_point(&[1.0, 2.0, 3.0], usize::MAX), 0.0);
        assert_eq!(smooth_point(&[1.0, 2.0, 3.0], usize::MAX - 1), 0.0);
    }

    #[test]
    fn test_peak_and_clipped() {
        let spectrum = [3.0, 9.0, 1.0];
        assert_eq!(peak(&spectrum), 9.0);
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[-4.0, -2.0]), -2.0);
        assert!(clipped(&spectrum, 779, 860).is_empty());
        assert_eq!(clipped(&spectrum, 1, 10), &[9.0, 1.0]);
        assert_eq!(bin_at(&spectrum, 5), None);
    }
}
