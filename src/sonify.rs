//! State-to-sound mapping: Bloch angles in, stereo tone out
//!
//! The polar angle sets the left/right balance (`cos(theta/2)` left,
//! `sin(theta/2)` right) and the azimuthal phase bends the right channel's
//! pitch by up to one octave (`2^(phi/2pi)` frequency ratio, quarter-cycle
//! offset baked in). Synthesis is a pure function of `(theta, phi, freq)`;
//! nothing is retained between calls.

use crate::note::PitchClass;
use crate::state::QubitState;
use std::f64::consts::PI;

/// Fixed output format: one 0.5 s stereo tone at 44.1 kHz per note request.
#[derive(Debug, Clone)]
pub struct SonifyConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Tone duration in seconds
    pub duration: f32,
}

impl Default for SonifyConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            duration: 0.5,
        }
    }
}

impl SonifyConfig {
    /// Number of stereo frames a tone spans: `floor(duration * sample_rate)`.
    pub fn frames(&self) -> usize {
        (self.duration * self.sample_rate as f32) as usize
    }
}

/// A finished tone: interleaved stereo i16 PCM, peak-normalized.
///
/// Ownership passes to whatever plays or writes it; the sonifier never keeps
/// a buffer around.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    /// Interleaved samples: left, right, left, right, ...
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl StereoBuffer {
    /// Number of stereo frames (sample pairs).
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Samples converted to f32 in [-1, 1], still interleaved. The cpal
    /// output path works in f32 regardless of the device format.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32 / 32768.0).collect()
    }
}

/// Sonify a state snapshot: extract `(theta, phi)` and synthesize the tone
/// for the requested pitch class.
pub fn sonify(state: &QubitState, pitch: PitchClass, config: &SonifyConfig) -> StereoBuffer {
    let (theta, phi) = state.bloch_angles();
    synthesize(theta, phi, pitch.frequency(), config)
}

/// Synthesize the stereo tone for Bloch angles `(theta, phi)` at `freq` Hz.
///
/// Left:  `cos(theta/2) * sin(2*pi*f*t)`
/// Right: `sin(theta/2) * sin(2*pi*f*t * 2^(phi/2pi) + pi/2)`
///
/// The buffer is scaled so its peak hits full i16 range. An all-zero buffer
/// (possible when both envelope factors vanish) skips the scaling division
/// and comes back as silence instead of a fault.
pub fn synthesize(theta: f64, phi: f64, freq: f32, config: &SonifyConfig) -> StereoBuffer {
    let frames = config.frames();
    let fs = config.sample_rate as f64;
    let f = freq as f64;

    let left_gain = (theta / 2.0).cos();
    let right_gain = (theta / 2.0).sin();
    // Phase maps linearly onto a pitch bend: phi = 0 leaves the right channel
    // at f, phi -> 2*pi approaches one octave up.
    let bend = 2f64.powf(phi / (2.0 * PI));

    let mut raw = Vec::with_capacity(frames * 2);
    let mut peak = 0f64;
    for i in 0..frames {
        let t = i as f64 / fs;
        let left = left_gain * (2.0 * PI * f * t).sin();
        let right = right_gain * (2.0 * PI * f * t * bend + PI / 2.0).sin();
        peak = peak.max(left.abs()).max(right.abs());
        raw.push(left);
        raw.push(right);
    }

    let samples = if peak > 0.0 {
        let scale = i16::MAX as f64 / peak;
        raw.iter().map(|&s| (s * scale) as i16).collect()
    } else {
        vec![0i16; frames * 2]
    };

    StereoBuffer {
        samples,
        sample_rate: config.sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Gate;

    fn channels(buffer: &StereoBuffer) -> (Vec<i16>, Vec<i16>) {
        let left = buffer.samples.iter().step_by(2).copied().collect();
        let right = buffer.samples.iter().skip(1).step_by(2).copied().collect();
        (left, right)
    }

    #[test]
    fn buffer_is_exactly_22050_frames() {
        let config = SonifyConfig::default();
        for pitch in PitchClass::ALL {
            let buffer = sonify(&QubitState::zero(), pitch, &config);
            assert_eq!(buffer.frames(), 22050);
            assert_eq!(buffer.samples.len(), 44100);
        }
    }

    #[test]
    fn zero_state_plays_only_the_left_channel() {
        let buffer = sonify(&QubitState::zero(), PitchClass::C, &SonifyConfig::default());
        let (left, right) = channels(&buffer);
        assert!(right.iter().all(|&s| s == 0), "right channel must be silent");
        let peak = left.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert_eq!(peak, i16::MAX as u16, "left channel should hit full scale");
    }

    #[test]
    fn zero_state_left_channel_is_a_plain_sine() {
        // theta = 0 means the left channel reduces to sin(2*pi*f*t) before
        // quantization; spot-check against the closed form.
        let config = SonifyConfig::default();
        let f = PitchClass::C.frequency() as f64;
        let buffer = sonify(&QubitState::zero(), PitchClass::C, &config);
        let (left, _) = channels(&buffer);
        for &i in &[0usize, 1, 100, 5000, 22049] {
            let t = i as f64 / config.sample_rate as f64;
            let expected = (2.0 * PI * f * t).sin();
            let got = left[i] as f64 / i16::MAX as f64;
            // Peak normalization rescales by at most the gap between the
            // sampled peak and a true 1.0, so allow a small relative slack.
            assert!(
                (got - expected).abs() < 2e-3,
                "sample {i}: expected {expected:.5}, got {got:.5}"
            );
        }
    }

    #[test]
    fn one_state_plays_only_the_right_channel() {
        let one = QubitState::zero().apply(Gate::X).unwrap();
        for pitch in [PitchClass::C, PitchClass::G, PitchClass::B] {
            let buffer = sonify(&one, pitch, &SonifyConfig::default());
            let (left, right) = channels(&buffer);
            // cos(theta/2) is ~0 at theta = pi; anything surviving is
            // quantization dust.
            assert!(left.iter().all(|&s| s.abs() <= 1), "left channel must be silent");
            let peak = right.iter().map(|s| s.unsigned_abs()).max().unwrap();
            assert_eq!(peak, i16::MAX as u16);
        }
    }

    #[test]
    fn equator_state_splits_energy_across_channels() {
        let plus = QubitState::zero().apply(Gate::H).unwrap();
        let buffer = sonify(&plus, PitchClass::A, &SonifyConfig::default());
        let (left, right) = channels(&buffer);
        let peak = |ch: &[i16]| ch.iter().map(|s| s.unsigned_abs()).max().unwrap();
        let (pl, pr) = (peak(&left), peak(&right));
        // Equal gains, so the two peaks agree to within quantization.
        assert!((pl as i32 - pr as i32).abs() <= 1, "peaks {pl} vs {pr}");
        assert_eq!(pl.max(pr), i16::MAX as u16);
    }

    #[test]
    fn phase_bends_the_right_channel_up() {
        // RZ advances phi, which must raise the right channel's frequency.
        // Count zero crossings as a cheap frequency estimate.
        let crossings = |ch: &[i16]| {
            ch.windows(2)
                .filter(|w| (w[0] >= 0) != (w[1] >= 0))
                .count()
        };
        let config = SonifyConfig::default();

        let plus = QubitState::zero().apply(Gate::H).unwrap();
        let bent = plus.apply(Gate::Rz(PI)).unwrap();

        let flat_buf = sonify(&plus, PitchClass::A, &config);
        let bent_buf = sonify(&bent, PitchClass::A, &config);
        let (_, flat_right) = channels(&flat_buf);
        let (_, bent_right) = channels(&bent_buf);

        let flat_hz = crossings(&flat_right) as f32 / 2.0 / config.duration;
        let bent_hz = crossings(&bent_right) as f32 / 2.0 / config.duration;
        assert!((flat_hz - 440.0).abs() < 5.0, "unbent right ~440 Hz, got {flat_hz}");
        // phi = pi/2 -> frequency ratio 2^(1/4) ~ 1.189
        let expected = 440.0 * 2f32.powf(0.25);
        assert!(
            (bent_hz - expected).abs() < 8.0,
            "bend should land near {expected} Hz: {flat_hz} -> {bent_hz}"
        );
    }

    #[test]
    fn degenerate_waveform_comes_back_as_silence() {
        // theta = 0 zeroes the right gain and f = 0 flattens the left sine,
        // so every sample is zero; normalization must not divide.
        let buffer = synthesize(0.0, 0.0, 0.0, &SonifyConfig::default());
        assert_eq!(buffer.frames(), 22050);
        assert!(buffer.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn to_f32_stays_in_unit_range() {
        let buffer = sonify(&QubitState::zero(), PitchClass::E, &SonifyConfig::default());
        assert!(buffer.to_f32().iter().all(|s| s.abs() <= 1.0));
        assert_eq!(buffer.to_f32().len(), buffer.samples.len());
    }
}
