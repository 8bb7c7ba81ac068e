use thiserror::Error;

/// Fatal failures of the playback pipeline.
///
/// Transient write failures are recovered at the device layer and only
/// surface here when recovery itself fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open playback device: {0}")]
    Open(String),

    #[error("cannot configure playback device: {0}")]
    Configure(String),

    #[error("write failed beyond recovery: {0}")]
    Write(String),

    #[error("cannot close playback device: {0}")]
    Close(String),

    #[error("invalid parameters: {0}")]
    BadParams(String),
}

pub type Result<T> = std::result::Result<T, Error>;
