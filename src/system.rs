use crate::engine::{CodecEngine, ConversionContext, Status, Step};
use crate::error::{Error, Result};
use iconv::{Iconv, IconvError};
use std::io;

/// Codec engine backed by the platform `iconv(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEngine;

pub struct SystemContext {
    cd: Iconv,
}

impl CodecEngine for SystemEngine {
    type Context = SystemContext;

    fn open(&self, from: &str, to: &str) -> Result<SystemContext> {
        match Iconv::new(from, to) {
            Ok(cd) => Ok(SystemContext { cd }),
            Err(IconvError::ConversionNotSupport) => Err(Error::unsupported(from, to)),
            Err(e) => Err(engine_error(e)),
        }
    }
}

impl ConversionContext for SystemContext {
    fn push(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        match self.cd.convert(input, output) {
            Ok((r, w, _)) => Ok(Step::new(r, w, Status::Consumed)),
            Err((r, w, IconvError::NotSufficientOutput)) => Ok(Step::new(r, w, Status::OutputFull)),
            Err((r, w, IconvError::IncompleteInput)) => Ok(Step::new(r, w, Status::Incomplete)),
            Err((r, w, IconvError::InvalidInput)) => Ok(Step::new(r, w, Status::Invalid)),
            Err((_, _, e)) => Err(engine_error(e)),
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<usize> {
        // the crate turns an empty input into a null inbuf, which is iconv's
        // flush; bytes written before a failure are dropped with the error
        match self.cd.convert(&[], output) {
            Ok((_, w, _)) => Ok(w),
            Err((_, _, e)) => Err(engine_error(e)),
        }
    }

    fn reset(&mut self) {
        self.cd.reset();
    }
}

fn engine_error(e: IconvError) -> Error {
    match e {
        IconvError::OsError(errno) => Error::Engine(io::Error::from_raw_os_error(errno)),
        other => Error::Engine(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}
