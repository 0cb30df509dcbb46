//! Error and warning types

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single YAML emission event
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("I/O error while writing YAML: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode YAML: {0}")]
    Encoding(String),
}

/// Failure while reading or interpreting a NetworkManager keyfile
#[derive(Debug, Error)]
pub enum KeyfileError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("cannot find {group}.{key}")]
    MissingKey {
        group: &'static str,
        key: &'static str,
    },

    #[error("cannot find SSID for WiFi connection")]
    MissingSsid,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    #[error("keyfile: {0}")]
    Keyfile(#[from] KeyfileError),

    #[error("cannot parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no network definition with id '{0}'")]
    UnknownNetdef(String),
}

impl Error {
    /// Attach the output path to an emission failure
    pub(crate) fn from_emit(path: impl Into<PathBuf>, err: EmitError) -> Self {
        let path = path.into();
        match err {
            EmitError::Io(source) => Error::Io { path, source },
            EmitError::Encoding(message) => Error::Encoding { path, message },
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Non-fatal problem found while rendering
///
/// The document is still written, using a fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnsupportedWifiMode { netdef_id: String, ssid: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedWifiMode { netdef_id, ssid } => write!(
                f,
                "{netdef_id} (SSID {ssid}), unsupported AP mode, falling back to 'infrastructure'"
            ),
        }
    }
}
