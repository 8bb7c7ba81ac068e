//! Dual-tone sine generation.

use std::f64::consts::TAU;

use crate::{ChannelMode, ToneParams};

/// Renders blocks of two sine tones into the engine's sample buffer.
///
/// In stereo each channel carries one tone; in mono both tones are averaged
/// into a single channel. Samples are unsigned 32-bit with the waveform's
/// origin shifted to mid-scale. The generator owns the rolling phase offset
/// that keeps the waveform continuous from one buffer to the next.
pub struct ToneGenerator {
    sample_rate: u32,
    volume: f64,
    tone1: u32,
    tone2: u32,
    channels: ChannelMode,
    phase: u64,
}

impl ToneGenerator {
    pub fn new(params: &ToneParams, channels: ChannelMode, sample_rate: u32) -> ToneGenerator {
        ToneGenerator {
            sample_rate,
            volume: params.volume,
            tone1: params.tone1,
            tone2: params.tone2,
            channels,
            phase: 0,
        }
    }

    /// Current phase offset in frames since the start of the waveform.
    pub fn phase(&self) -> u64 {
        self.phase
    }

    /// Overwrites `buffer` with the next block and advances the phase offset
    /// by the block length. `buffer.len()` must be a multiple of the channel
    /// count.
    pub fn fill_buffer(&mut self, buffer: &mut [u32]) {
        let frames = buffer.len() / self.channels.count();

        match self.channels {
            ChannelMode::Stereo => {
                for (i, frame) in buffer.chunks_exact_mut(2).enumerate() {
                    frame[0] = unsigned(self.tone_value(i as u64, self.tone1) * self.volume);
                    frame[1] = unsigned(self.tone_value(i as u64, self.tone2) * self.volume);
                }
            }
            ChannelMode::Mono => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let mixed = (self.tone_value(i as u64, self.tone1)
                        + self.tone_value(i as u64, self.tone2))
                        / 2.0;
                    *sample = unsigned(mixed * self.volume);
                }
            }
        }

        // Bound the time index so it cannot drift over long runs. The
        // modulus is a heuristic, not an exact period of the summed
        // waveform.
        self.phase =
            (self.phase + frames as u64) % (self.tone1 as u64 * self.tone2 as u64 * 1000);
    }

    fn tone_value(&self, index: u64, tone: u32) -> f64 {
        let period = self.sample_rate as f64 / tone as f64;
        (TAU * (self.phase + index) as f64 / period).sin()
    }
}

/// Maps a signed waveform value (in [-1, 1] at volume 1) onto the unsigned
/// 32-bit sample range, origin at mid-scale.
fn unsigned(value: f64) -> u32 {
    (value * i32::MAX as f64 - i32::MIN as f64) as u32
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const MID_SCALE: u32 = 0x8000_0000;

    fn generator(volume: f64, channels: ChannelMode) -> ToneGenerator {
        let params = ToneParams {
            volume,
            ..ToneParams::default()
        };
        ToneGenerator::new(&params, channels, 52000)
    }

    #[test]
    fn tone_value_follows_the_sine_formula() {
        let gen = generator(1.0, ChannelMode::Mono);
        // 100 Hz at 52 kHz is a 520-frame cycle: crest at 130, zero at 260.
        assert_relative_eq!(gen.tone_value(130, 100), 1.0, epsilon = 1e-9);
        assert_relative_eq!(gen.tone_value(260, 100), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn identical_inputs_give_bit_identical_buffers() {
        let mut a = generator(0.25, ChannelMode::Stereo);
        let mut b = generator(0.25, ChannelMode::Stereo);
        let mut buf_a = vec![0u32; 1040];
        let mut buf_b = vec![0u32; 1040];
        a.fill_buffer(&mut buf_a);
        b.fill_buffer(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }

    #[test]
    fn zero_volume_is_constant_mid_scale() {
        let mut gen = generator(0.0, ChannelMode::Mono);
        let mut buf = vec![0u32; 520];
        gen.fill_buffer(&mut buf);
        assert!(buf.iter().all(|&sample| sample == MID_SCALE));
    }

    #[test]
    fn first_mono_sample_sits_at_mid_scale() {
        let mut gen = generator(0.25, ChannelMode::Mono);
        let mut buf = vec![0u32; 52000];
        gen.fill_buffer(&mut buf);
        assert_eq!(buf[0], MID_SCALE);
    }

    #[test]
    fn full_volume_spans_the_unsigned_range() {
        let mut gen = generator(1.0, ChannelMode::Stereo);
        let mut buf = vec![0u32; 2 * 520];
        gen.fill_buffer(&mut buf);
        assert_eq!(buf[0], MID_SCALE); // zero crossing
        assert_eq!(buf[130 * 2], u32::MAX); // tone 1 crest
        assert_eq!(buf[390 * 2], 1); // tone 1 trough
    }

    #[test]
    fn stereo_channels_carry_one_tone_each() {
        let mut gen = generator(0.5, ChannelMode::Stereo);
        let reference = generator(0.5, ChannelMode::Stereo);
        let mut buf = vec![0u32; 2048];
        gen.fill_buffer(&mut buf);
        for (i, frame) in buf.chunks_exact(2).enumerate() {
            assert_eq!(frame[0], unsigned(reference.tone_value(i as u64, 100) * 0.5));
            assert_eq!(frame[1], unsigned(reference.tone_value(i as u64, 110) * 0.5));
        }
    }

    #[test]
    fn phase_advances_per_block_and_wraps() {
        let mut gen = generator(0.25, ChannelMode::Mono);
        let mut buf = vec![0u32; 52000];
        gen.fill_buffer(&mut buf);
        assert_eq!(gen.phase(), 52000);
        // The accumulator wraps at tone1 * tone2 * 1000 = 11_000_000.
        for _ in 0..211 {
            gen.fill_buffer(&mut buf);
        }
        assert_eq!(gen.phase(), 212 * 52000 % 11_000_000);
    }

    #[test]
    fn buffers_are_phase_continuous() {
        let mut gen = generator(0.25, ChannelMode::Mono);
        let mut first = vec![0u32; 520];
        let mut second = vec![0u32; 520];
        gen.fill_buffer(&mut first);
        gen.fill_buffer(&mut second);

        // The second buffer must equal one generated from a phase offset of
        // 520, not a restart from zero.
        let mut resumed = generator(0.25, ChannelMode::Mono);
        resumed.phase = 520;
        let mut expected = vec![0u32; 520];
        resumed.fill_buffer(&mut expected);
        assert_eq!(second, expected);
        assert_ne!(second, first);
    }
}
