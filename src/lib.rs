//! Generating and streaming a dual-tone sleep-aid waveform.
//!
//! The [`ToneGenerator`] renders one-second blocks of two summed (mono) or
//! split (stereo) sine tones as unsigned 32-bit samples; the [`Engine`]
//! paces those blocks into a playback device behind the [`PcmDevice`]
//! capability trait. On Linux the device is ALSA's blocking interleaved
//! write API; elsewhere an inert stub keeps the crate building.

mod engine;
mod error;
mod tone;

#[cfg(target_os = "linux")]
#[path = "alsa_snd.rs"]
mod snd;

#[cfg(not(target_os = "linux"))]
#[path = "dummy_snd.rs"]
mod snd;

pub use engine::{Engine, PcmDevice};
pub use error::{Error, Result};
pub use snd::Pcm;
pub use tone::ToneGenerator;

/// Channel layout of the generated buffers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChannelMode {
    /// Both tones mixed into a single channel.
    Mono,
    /// Tone 1 on the left, tone 2 on the right, interleaved.
    Stereo,
}

impl ChannelMode {
    pub fn count(self) -> usize {
        match self {
            ChannelMode::Mono => 1,
            ChannelMode::Stereo => 2,
        }
    }
}

/// Playback parameters, fixed for the lifetime of the stream.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Name of the output device.
    pub device: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    pub channels: ChannelMode,
    /// Requested hardware latency in microseconds.
    pub latency_us: u32,
    /// Duration covered by one generated block, in milliseconds.
    pub block_ms: u32,
}

impl Default for PlaybackConfig {
    fn default() -> PlaybackConfig {
        PlaybackConfig {
            device: "default".to_string(),
            sample_rate: 52000,
            channels: ChannelMode::Stereo,
            latency_us: 100_000,
            block_ms: 1000,
        }
    }
}

impl PlaybackConfig {
    /// Frames in one generated block.
    pub fn block_frames(&self) -> usize {
        (self.sample_rate / 1000 * self.block_ms) as usize
    }

    /// Samples in one generated block, all channels interleaved.
    pub fn buffer_len(&self) -> usize {
        self.block_frames() * self.channels.count()
    }
}

/// The two tones and their shared gain.
#[derive(Clone, Debug)]
pub struct ToneParams {
    /// Normalized gain. Values above 1.0 overdrive the waveform.
    pub volume: f64,
    /// First tone frequency in Hz.
    pub tone1: u32,
    /// Second tone frequency in Hz.
    pub tone2: u32,
}

impl Default for ToneParams {
    fn default() -> ToneParams {
        ToneParams {
            volume: 0.25,
            tone1: 100,
            tone2: 110,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_is_one_second_of_frames() {
        let config = PlaybackConfig::default();
        assert_eq!(config.block_frames(), 52000);
        assert_eq!(config.buffer_len(), 104000);
    }

    #[test]
    fn stereo_buffers_are_twice_the_mono_length() {
        let mono = PlaybackConfig {
            channels: ChannelMode::Mono,
            ..PlaybackConfig::default()
        };
        let stereo = PlaybackConfig::default();
        assert_eq!(stereo.buffer_len(), 2 * mono.buffer_len());
    }
}
