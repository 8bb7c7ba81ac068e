//! The playback loop: refill the buffer, write it, recover once on failure.

use std::fmt::Display;

use crate::tone::ToneGenerator;
use crate::{Error, PlaybackConfig, Result, ToneParams};

/// Capability interface of a playback device.
///
/// The engine drives any implementation through open → configure →
/// write/recover → close. `alsa_snd.rs` binds this to ALSA; tests substitute
/// a scripted mock to exercise the recovery and short-write paths.
pub trait PcmDevice: Sized {
    /// Device error for a failed buffer write.
    type WriteError: Display;

    /// Acquires the output device named by `config` in playback mode.
    fn open(config: &PlaybackConfig) -> Result<Self>;

    /// Applies sample format, access mode, channel count, sample rate,
    /// resampling policy and target latency. A rejected parameter fails the
    /// whole configuration; nothing is retried piecemeal.
    fn configure(&mut self, config: &PlaybackConfig) -> Result<()>;

    /// Blocking write of one interleaved buffer. Returns the number of
    /// frames the device accepted, which may be fewer than requested.
    fn write(&mut self, buffer: &[u32]) -> std::result::Result<usize, Self::WriteError>;

    /// Attempts to resume the stream after a failed write without tearing it
    /// down. A successful recovery reports 0 accepted frames.
    fn recover(&mut self, error: Self::WriteError)
        -> std::result::Result<usize, Self::WriteError>;

    /// Releases the device, letting already queued audio finish playing.
    fn close(self) -> Result<()>;
}

/// Streaming engine.
///
/// Owns the device handle, the sample buffer and the tone generator, and
/// paces generation off the device's blocking writes. Single threaded: each
/// block is generated, then written, with no overlap between the two.
pub struct Engine<D: PcmDevice> {
    device: D,
    generator: ToneGenerator,
    buffer: Vec<u32>,
    frames: usize,
}

impl<D: PcmDevice> Engine<D> {
    /// Opens and configures the playback device, then assembles the engine
    /// around it. Parameters are checked before the device is touched.
    pub fn open(playback: &PlaybackConfig, tone: &ToneParams) -> Result<Engine<D>> {
        if tone.tone1 == 0 || tone.tone2 == 0 {
            return Err(Error::BadParams(format!(
                "tone frequencies must be positive, got {} and {}",
                tone.tone1, tone.tone2
            )));
        }
        if playback.block_frames() == 0 {
            return Err(Error::BadParams(format!(
                "empty block: {} ms at {} Hz",
                playback.block_ms, playback.sample_rate
            )));
        }

        let mut device = D::open(playback)?;
        device.configure(playback)?;

        Ok(Engine::with_device(device, playback, tone))
    }

    /// Assembles the engine around an already opened and configured device.
    pub fn with_device(device: D, playback: &PlaybackConfig, tone: &ToneParams) -> Engine<D> {
        Engine {
            device,
            generator: ToneGenerator::new(tone, playback.channels, playback.sample_rate),
            buffer: vec![0; playback.buffer_len()],
            frames: playback.block_frames(),
        }
    }

    /// Plays `blocks` blocks, or loops until a fatal device error on `None`.
    ///
    /// The bounded variant closes the device before returning, so queued
    /// audio finishes playing.
    pub fn run(mut self, blocks: Option<u64>) -> Result<()> {
        match blocks {
            Some(count) => {
                for _ in 0..count {
                    self.play_block()?;
                }
                self.close()
            }
            None => loop {
                self.play_block()?;
            },
        }
    }

    /// One loop iteration: refill the buffer, write it, recover once on
    /// failure.
    pub fn play_block(&mut self) -> Result<()> {
        self.generator.fill_buffer(&mut self.buffer);

        let result = match self.device.write(&self.buffer) {
            Err(error) => {
                log::debug!("write failed ({error}), attempting stream recovery");
                self.device.recover(error)
            }
            accepted => accepted,
        };

        match result {
            Err(error) => Err(Error::Write(error.to_string())),
            Ok(written) if written > 0 && written < self.frames => {
                // The unplayed tail is dropped rather than resubmitted; the
                // next iteration starts a fresh block.
                log::warn!("short write: expected {}, wrote {}", self.frames, written);
                Ok(())
            }
            Ok(_) => Ok(()),
        }
    }

    /// Releases the device.
    pub fn close(self) -> Result<()> {
        self.device.close()
    }
}
