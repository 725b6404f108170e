//! Offline rendering: write tones to WAV and summarize them
//!
//! Gives the CLI a file-level surface and gives tests something to verify
//! without listening. The WAV format matches the buffer exactly: stereo,
//! 16-bit, whatever sample rate the buffer carries.

use crate::sonify::StereoBuffer;
use std::path::Path;

/// Write a stereo buffer to a 16-bit WAV file.
pub fn write_wav(path: &Path, buffer: &StereoBuffer) -> Result<(), String> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| format!("Failed to create WAV file: {e}"))?;

    for &sample in &buffer.samples {
        writer
            .write_sample(sample)
            .map_err(|e| format!("Failed to write sample: {e}"))?;
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize WAV: {e}"))?;

    Ok(())
}

/// Per-channel statistics over a rendered tone.
#[derive(Debug, Clone)]
pub struct ChannelStats {
    pub rms: f32,
    pub peak: f32,
    pub zero_crossings: usize,
    /// Crude pitch estimate from zero crossings; 0 for a silent channel.
    pub est_frequency: f32,
}

/// Statistics for both channels of a tone.
#[derive(Debug, Clone)]
pub struct BufferStats {
    pub frames: usize,
    pub duration: f32,
    pub left: ChannelStats,
    pub right: ChannelStats,
}

impl BufferStats {
    pub fn from_buffer(buffer: &StereoBuffer) -> Self {
        let duration = buffer.duration_secs();
        let left: Vec<f32> = buffer.to_f32().iter().step_by(2).copied().collect();
        let right: Vec<f32> = buffer.to_f32().iter().skip(1).step_by(2).copied().collect();
        Self {
            frames: buffer.frames(),
            duration,
            left: ChannelStats::from_samples(&left, duration),
            right: ChannelStats::from_samples(&right, duration),
        }
    }

    pub fn print_summary(&self) {
        println!("Render statistics:");
        println!("  Frames:    {}", self.frames);
        println!("  Duration:  {:.3} s", self.duration);
        for (name, ch) in [("Left", &self.left), ("Right", &self.right)] {
            println!(
                "  {:<6} rms {:.3}  peak {:.3}  est. {:.1} Hz",
                name, ch.rms, ch.peak, ch.est_frequency
            );
        }
    }
}

impl ChannelStats {
    fn from_samples(samples: &[f32], duration: f32) -> Self {
        let n = samples.len().max(1);
        let rms = (samples.iter().map(|x| x * x).sum::<f32>() / n as f32).sqrt();
        let peak = samples.iter().map(|x| x.abs()).fold(0.0f32, f32::max);

        let mut zero_crossings = 0;
        for pair in samples.windows(2) {
            if (pair[0] >= 0.0) != (pair[1] >= 0.0) {
                zero_crossings += 1;
            }
        }

        let est_frequency = if peak > 0.0 && duration > 0.0 {
            zero_crossings as f32 / (2.0 * duration)
        } else {
            0.0
        };

        Self {
            rms,
            peak,
            zero_crossings,
            est_frequency,
        }
    }
}
