// Playback through ALSA's blocking interleaved write API.

use alsa::pcm::{Access, Format, Frames, HwParams, PCM};
use alsa::{Direction, ValueOr};

use crate::engine::PcmDevice;
use crate::{Error, PlaybackConfig, Result};

/// Handle to an open ALSA playback stream.
pub struct Pcm {
    pcm: PCM,
}

impl PcmDevice for Pcm {
    type WriteError = alsa::Error;

    fn open(config: &PlaybackConfig) -> Result<Pcm> {
        let pcm = PCM::new(&config.device, Direction::Playback, false)
            .map_err(|e| Error::Open(e.to_string()))?;
        Ok(Pcm { pcm })
    }

    fn configure(&mut self, config: &PlaybackConfig) -> Result<()> {
        self.apply_params(config)
            .map_err(|e| Error::Configure(e.to_string()))
    }

    fn write(&mut self, buffer: &[u32]) -> std::result::Result<usize, alsa::Error> {
        self.pcm.io_u32()?.writei(buffer)
    }

    fn recover(&mut self, error: alsa::Error) -> std::result::Result<usize, alsa::Error> {
        self.pcm.try_recover(error, true)?;
        // The resumed stream has accepted nothing from the failed write.
        Ok(0)
    }

    fn close(self) -> Result<()> {
        self.pcm.drain().map_err(|e| Error::Close(e.to_string()))
    }
}

impl Pcm {
    fn apply_params(&self, config: &PlaybackConfig) -> std::result::Result<(), alsa::Error> {
        let latency_frames =
            (config.sample_rate as u64 * config.latency_us as u64 / 1_000_000) as Frames;

        let hwp = HwParams::any(&self.pcm)?;
        hwp.set_access(Access::RWInterleaved)?;
        hwp.set_format(Format::u32())?;
        hwp.set_channels(config.channels.count() as u32)?;
        hwp.set_rate_resample(true)?;
        hwp.set_rate(config.sample_rate, ValueOr::Nearest)?;
        hwp.set_buffer_size_near(latency_frames)?;
        self.pcm.hw_params(&hwp)?;

        let hwp = self.pcm.hw_params_current()?;
        let swp = self.pcm.sw_params_current()?;
        swp.set_start_threshold(hwp.get_buffer_size()?)?;
        self.pcm.sw_params(&swp)?;

        self.pcm.prepare()
    }
}
