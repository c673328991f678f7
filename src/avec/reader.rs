//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{self, Read},
    vec,
};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::{
    message::Message,
    sans::{Scanner, envelope::EnvelopeError, record::TruncatedRecord},
};

use super::slice;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(io::Error),
    /// The bulletin is malformed.
    #[error(transparent)]
    Format(#[from] slice::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::Format(slice::Error::EndOfSlice),
            _ => Self::Io(err),
        }
    }
}

impl From<EnvelopeError> for Error {
    fn from(err: EnvelopeError) -> Self {
        Self::Format(err.into())
    }
}

impl From<TruncatedRecord> for Error {
    fn from(err: TruncatedRecord) -> Self {
        Self::Format(err.into())
    }
}

/// Decode a bulletin from a reader.
///
/// Reads up to the end of the data section, and no further.
///
/// This method is also re-exported as `windsock::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
#[tracing::instrument(level = "debug", skip_all)]
pub fn decode(r: &mut impl Read) -> Result<Message, Error> {
    let (header, indicator) = Scanner::advance(take(r)?);
    let (indicator, mut section) = indicator.advance(take(r)?)?;

    let data_section = loop {
        let (skip, successor) = section.advance(take(r)?)?;
        skip_bytes(r, skip)?;

        section = match successor {
            Left(state) => state,
            Right(state) => break state,
        };
    };

    let (size, payload) = data_section.advance(take(r)?)?;

    let mut buf = vec![0; size];
    r.read_exact(&mut buf)?;

    let stations = payload.advance(&buf)?;

    tracing::debug!(stations = stations.len(), "decoded bulletin");

    Ok(Message {
        header,
        indicator,
        stations,
    })
}

/// Take an exact number of bytes from a reader.
fn take<const N: usize>(r: &mut impl Read) -> Result<[u8; N], Error> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;

    Ok(buf)
}

/// Pass over an exact number of bytes from a reader.
fn skip_bytes(r: &mut impl Read, n: usize) -> Result<(), Error> {
    let skipped = io::copy(&mut r.by_ref().take(n as u64), &mut io::sink())?;

    if skipped != n as u64 {
        Err(slice::Error::EndOfSlice)?;
    }

    Ok(())
}
