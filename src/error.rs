use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// failures of the timer state store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("couldn't access timer state: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't parse timer state: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("couldn't serialize timer state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// failures of the platform alarm facility
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("couldn't run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Rejected {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{0} can't be expressed as a local time")]
    InvalidInstant(i64),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("couldn't open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("couldn't open sound file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't decode sound file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't access config file: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("couldn't find a home directory")]
    NoHome,
}

#[derive(Debug, Error)]
pub enum Error {
    /// the timer state couldn't be read or written, the operation wasn't applied
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error(transparent)]
    Scheduling(#[from] SchedulerError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
