use crate::settings::SettingValue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The OS setting is unset or holds something other than one of the known OS tokens
    #[error("unknown operating system setting: {0:?}")]
    UnknownOperatingSystem(Option<SettingValue>),
    #[error("effector failed: {0}")]
    Effector(#[from] EffectorError),
    #[error("invalid layout: {0}")]
    Layout(String),
}

/// An effector could not perform an action. Never retried by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectorError {
    #[error("device buffer is full")]
    BufferFull,
    #[error("{0} is not supported by this output")]
    Unsupported(&'static str),
    #[error("device error: {0}")]
    Device(String),
}
