use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The codec engine does not know the (from, to) pair.
    #[error("conversion from {from} to {to} is not supported")]
    UnsupportedEncoding { from: String, to: String },

    /// Input bytes are not valid in the source encoding.
    #[error("invalid byte sequence for {encoding} at offset {offset}")]
    InvalidSequence { encoding: String, offset: usize },

    #[error("cannot allocate {requested} bytes for converted output")]
    OutOfMemory { requested: usize },

    /// Any other failure reported by the engine while opening, pushing or flushing.
    #[error("codec engine failure: {0}")]
    Engine(#[source] io::Error),
}

impl Error {
    pub(crate) fn unsupported(from: &str, to: &str) -> Self {
        Error::UnsupportedEncoding {
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }

    /// `true` for the one error an autodetection candidate may recover from.
    pub fn is_invalid_sequence(&self) -> bool {
        matches!(self, Error::InvalidSequence { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::UnsupportedEncoding { .. })
    }
}
