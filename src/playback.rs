//! Audio playback sink on cpal
//!
//! One long-lived output stream drains a bounded queue of finished tones and
//! plays them back-to-back. The event loop never blocks on audio: it hands a
//! buffer over and keeps going. When tones arrive faster than they play out
//! and the queue is full, the newest one is dropped and logged, keeping
//! memory bounded.
//!
//! The device is taken as it comes: any sample format (f32/i16/u16), any
//! channel count. A device rate other than 44.1 kHz shifts pitch slightly;
//! no resampling is done.

use crate::sonify::StereoBuffer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Maximum number of tones waiting behind the one currently playing.
pub const QUEUE_CAPACITY: usize = 8;

pub struct PlaybackSink {
    sample_rate: u32,
    queue: Arc<Mutex<ToneQueue>>,
    _stream: cpal::Stream,
}

/// Shared between the enqueueing thread and the audio callback.
struct ToneQueue {
    pending: VecDeque<Vec<f32>>,
    current: Option<Vec<f32>>,
    position: usize,
}

impl PlaybackSink {
    /// Open the default output device and start the (initially silent) stream.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        info!("Audio host: {:?}", host.id());

        let device = host
            .default_output_device()
            .ok_or("No audio output device found")?;
        info!("Audio device: {}", device.name()?);

        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        if sample_rate != 44100 {
            warn!(
                "Device runs at {} Hz, tones are 44100 Hz; pitch will shift slightly",
                sample_rate
            );
        }

        let queue = Arc::new(Mutex::new(ToneQueue {
            pending: VecDeque::new(),
            current: None,
            position: 0,
        }));
        let queue_clone = queue.clone();

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config.into(), queue_clone, channels)
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config.into(), queue_clone, channels)
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config.into(), queue_clone, channels)
            }
            _ => return Err("Unsupported sample format".into()),
        }?;

        stream.play()?;
        info!("Audio stream started at {} Hz", sample_rate);

        Ok(Self {
            sample_rate,
            queue,
            _stream: stream,
        })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        queue: Arc<Mutex<ToneQueue>>,
        channels: usize,
    ) -> Result<cpal::Stream, Box<dyn std::error::Error>>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut queue = queue.lock().unwrap();
                queue.fill(data, channels);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }

    /// Hand a tone to the sink. Returns false (and drops the tone) when the
    /// queue is already full.
    pub fn enqueue(&self, buffer: StereoBuffer) -> bool {
        self.queue.lock().unwrap().offer(buffer.to_f32())
    }

    /// Whether anything is playing or queued.
    pub fn is_idle(&self) -> bool {
        let queue = self.queue.lock().unwrap();
        queue.current.is_none() && queue.pending.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl ToneQueue {
    /// Accept a tone unless the backlog is already at capacity, in which
    /// case the tone is dropped and the drop is logged.
    fn offer(&mut self, samples: Vec<f32>) -> bool {
        if self.pending.len() >= QUEUE_CAPACITY {
            warn!(
                "Playback queue full ({} tones pending), dropping note",
                self.pending.len()
            );
            return false;
        }
        self.pending.push_back(samples);
        true
    }

    /// Write the next chunk of output, pulling tones off the queue as each
    /// one finishes. Interleaved stereo frames map onto however many
    /// channels the device offers; silence everywhere once the queue drains.
    fn fill<T>(&mut self, output: &mut [T], channels: usize)
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        for frame in output.chunks_mut(channels) {
            if self.current.is_none() {
                self.current = self.pending.pop_front();
                self.position = 0;
            }

            let (left, right) = match &self.current {
                Some(samples) if self.position + 1 < samples.len() => {
                    let l = samples[self.position];
                    let r = samples[self.position + 1];
                    self.position += 2;
                    if self.position >= samples.len() {
                        self.current = None;
                    }
                    (l, r)
                }
                _ => {
                    self.current = None;
                    (0.0, 0.0)
                }
            };

            match frame.len() {
                0 => {}
                1 => frame[0] = T::from_sample(0.5 * (left + right)),
                _ => {
                    frame[0] = T::from_sample(left);
                    frame[1] = T::from_sample(right);
                    for sample in frame.iter_mut().skip(2) {
                        *sample = T::from_sample(0.0);
                    }
                }
            }
        }
    }
}
