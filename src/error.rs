// SPDX-License-Identifier: MPL-2.0
use crate::host::InstantiateError;
use std::fmt;

/// Crate-level error type.
///
/// `Instantiate` is the only hard failure an overlay operation can surface;
/// the remaining variants originate in the configuration layer. Overlay
/// entry points return the narrower [`InstantiateError`] directly, and the
/// `From` impl lets application code lift either into one `Result` chain.
#[derive(Debug, Clone)]
pub enum Error {
    /// A component descriptor could not be instantiated by the host.
    Instantiate(InstantiateError),
    /// Reading or writing a configuration file failed.
    Io(String),
    /// A configuration file could not be parsed or serialized.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Instantiate(e) => write!(f, "Instantiation Error: {e}"),
            Error::Io(e) => write!(f, "I/O Error: {e}"),
            Error::Config(e) => write!(f, "Config Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<InstantiateError> for Error {
    fn from(err: InstantiateError) -> Self {
        Error::Instantiate(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
