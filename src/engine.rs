//! The seam between the transcoder and whatever actually knows the codec
//! tables.

use crate::error::Result;

/// Why a [`ConversionContext::push`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All input was consumed.
    Consumed,
    /// The output slice filled up before the input was consumed.
    OutputFull,
    /// The input ends in the middle of a multi-byte sequence.
    Incomplete,
    /// The input at `read` is not valid in the source encoding.
    Invalid,
}

/// Progress made by one push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub read: usize,
    pub written: usize,
    pub status: Status,
}

impl Step {
    pub fn new(read: usize, written: usize, status: Status) -> Self {
        Step { read, written, status }
    }
}

/// Opens conversion contexts for pairs of concrete encoding names.
pub trait CodecEngine {
    type Context: ConversionContext;

    /// Fails with [`Error::UnsupportedEncoding`](crate::Error::UnsupportedEncoding)
    /// when the pair is unknown.
    fn open(&self, from: &str, to: &str) -> Result<Self::Context>;
}

/// A stateful handle bound to one (from, to) pair. Dropping it releases it.
pub trait ConversionContext {
    /// Convert as much of `input` into `output` as fits.
    fn push(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step>;

    /// Write out whatever the context still holds (e.g. a closing shift
    /// sequence) and return the number of bytes written.
    fn flush(&mut self, output: &mut [u8]) -> Result<usize>;

    /// Return to the initial shift state.
    fn reset(&mut self);
}
