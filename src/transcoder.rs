use crate::detect::Autodetect;
use crate::engine::{CodecEngine, ConversionContext, Status};
use crate::error::{Error, Result};
use crate::system::SystemEngine;
use std::io;
use tracing::{debug, trace};

/// Size of the window every push writes into.
pub const SCRATCH_SIZE: usize = 4096;

/// Converts byte strings between encodings, measuring the output first and
/// then filling a buffer of exactly that size.
///
/// Every call opens its own context and drops it before returning or
/// before moving on to the next autodetection candidate.
#[derive(Debug, Clone, Default)]
pub struct Transcoder<E> {
    engine: E,
}

impl Transcoder<SystemEngine> {
    pub fn system() -> Self {
        Transcoder::new(SystemEngine)
    }
}

impl<E: CodecEngine> Transcoder<E> {
    pub fn new(engine: E) -> Self {
        Transcoder { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// convert `input` from `from` to `to`.
    ///
    /// `from` may be one of the [`Autodetect`] tokens. A multi-byte
    /// sequence cut off at the end of `input` is dropped silently.
    pub fn convert(&self, to: &str, from: &str, input: &[u8]) -> Result<Vec<u8>> {
        self.dispatch(to, from, |mut cx, from| {
            let len = measure(&mut cx, from, input)?;
            trace!(from = %from, to = %to, len, "sized conversion");
            if len == 0 {
                return Ok(Vec::new());
            }
            fill(&mut cx, from, input, len)
        })
    }

    /// The number of bytes [`convert`](Self::convert) would return.
    pub fn converted_len(&self, to: &str, from: &str, input: &[u8]) -> Result<usize> {
        self.dispatch(to, from, |mut cx, from| {
            let len = measure(&mut cx, from, input)?;
            trace!(from = %from, to = %to, len, "sized conversion");
            Ok(len)
        })
    }

    fn dispatch<T, F>(&self, to: &str, from: &str, attempt: F) -> Result<T>
    where
        F: Fn(E::Context, &str) -> Result<T>,
    {
        if !usable_name(to) || !usable_name(from) {
            return Err(Error::unsupported(from, to));
        }
        match self.engine.open(from, to) {
            Ok(cx) => attempt(cx, from),
            Err(e) if e.is_unsupported() => match Autodetect::from_token(from) {
                Some(detect) => self.detect(to, detect, attempt),
                None => {
                    debug!(from = %from, to = %to, "unsupported conversion");
                    Err(e)
                }
            },
            Err(e) => {
                debug!(from = %from, to = %to, error = %e, "cannot open conversion");
                Err(e)
            }
        }
    }

    fn detect<T, F>(&self, to: &str, detect: Autodetect, attempt: F) -> Result<T>
    where
        F: Fn(E::Context, &str) -> Result<T>,
    {
        let mut outcome = Err(Error::unsupported(detect.token(), to));
        for &candidate in detect.candidates() {
            outcome = self
                .engine
                .open(candidate, to)
                .and_then(|cx| attempt(cx, candidate));
            match &outcome {
                Err(e) if e.is_invalid_sequence() => {
                    debug!(token = detect.token(), candidate = %candidate, error = %e, "candidate rejected input");
                }
                _ => break,
            }
        }
        outcome
    }
}

fn usable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('\0')
}

/// Push all of `input` and the final flush through a scratch window,
/// handing every produced chunk to `sink`.
fn drive<C, F>(cx: &mut C, from: &str, input: &[u8], mut sink: F) -> Result<()>
where
    C: ConversionContext,
    F: FnMut(&[u8]),
{
    let mut scratch = [0u8; SCRATCH_SIZE];
    let mut read = 0;
    while read < input.len() {
        let step = cx.push(&input[read..], &mut scratch)?;
        if step.status == Status::OutputFull && step.read == 0 && step.written == 0 {
            return Err(Error::Engine(io::Error::new(
                io::ErrorKind::Other,
                format!("{} conversion made no progress at offset {}", from, read),
            )));
        }
        read += step.read;
        match step.status {
            Status::Consumed | Status::OutputFull => sink(&scratch[..step.written]),
            Status::Incomplete => {
                sink(&scratch[..step.written]);
                break;
            }
            Status::Invalid => {
                return Err(Error::InvalidSequence {
                    encoding: from.to_owned(),
                    offset: read,
                })
            }
        }
    }
    let n = cx.flush(&mut scratch)?;
    sink(&scratch[..n]);
    Ok(())
}

fn measure<C: ConversionContext>(cx: &mut C, from: &str, input: &[u8]) -> Result<usize> {
    let mut count = 0;
    drive(cx, from, input, |chunk| count += chunk.len())?;
    Ok(count)
}

fn fill<C: ConversionContext>(cx: &mut C, from: &str, input: &[u8], len: usize) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    output
        .try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { requested: len })?;
    cx.reset();
    drive(cx, from, input, |chunk| {
        assert!(
            output.len() + chunk.len() <= len,
            "sizing and conversion passes disagree: more than {} bytes produced",
            len
        );
        output.extend_from_slice(chunk);
    })?;
    assert_eq!(
        output.len(),
        len,
        "sizing and conversion passes disagree on output length"
    );
    Ok(output)
}
