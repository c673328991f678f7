//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::{
    message::Message,
    sans::{
        Scanner,
        envelope::{EnvelopeError, HEADER_LEN, IndicatorSection, Payload},
        record::TruncatedRecord,
    },
};

/// Errors occurring while decoding from a slice.
///
/// Every variant means the bulletin is malformed and should be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the slice.
    #[error("Unexpectedly reached the end of the slice.")]
    EndOfSlice,
    /// Malformed envelope.
    #[error("Malformed envelope: {0}.")]
    Envelope(#[from] EnvelopeError),
    /// The data section ended inside a record.
    #[error("Malformed data section: {0}.")]
    Truncated(#[from] TruncatedRecord),
}

/// The located parts of a bulletin.
#[derive(Debug, Clone)]
pub struct Envelope<'a> {
    /// Bulletin heading, uninterpreted.
    pub header: [u8; HEADER_LEN],
    pub indicator: IndicatorSection,
    /// Byte offset of the data section (section 4) in the bulletin.
    pub data_offset: usize,
    /// Packed payload of the data section.
    pub payload: &'a [u8],
}

impl Envelope<'_> {
    /// Number of packed payload bits declared by the data section.
    pub fn bit_len(&self) -> usize {
        self.payload.len() * 8
    }
}

/// Locate the data section of a bulletin, without decoding it.
pub fn scan(r: &[u8]) -> Result<Envelope<'_>, Error> {
    locate(r).map(|(envelope, _)| envelope)
}

fn locate(r: &[u8]) -> Result<(Envelope<'_>, Payload), Error> {
    let i = &mut 0; // Offset of the next unread byte.

    let (header, indicator) = Scanner::advance(take(r, i)?);
    let (indicator, mut section) = indicator.advance(take(r, i)?)?;

    let data_section = loop {
        let (skip, successor) = section.advance(take(r, i)?)?;
        skip_bytes(r, i, skip)?;

        section = match successor {
            Left(state) => state,
            Right(state) => break state,
        };
    };

    let data_offset = *i;
    let (size, token) = data_section.advance(take(r, i)?)?;

    let start = *i;
    skip_bytes(r, i, size)?;

    let envelope = Envelope {
        header,
        indicator,
        data_offset,
        payload: &r[start..*i],
    };

    Ok((envelope, token))
}

/// Decode a bulletin from a slice.
///
/// This method is also re-exported as `windsock::avec::decode_slice` and
/// `windsock::decode`.
#[tracing::instrument(level = "debug", skip_all, fields(len = r.len()))]
pub fn decode(r: &[u8]) -> Result<Message, Error> {
    let (envelope, payload) = locate(r)?;
    let stations = payload.advance(envelope.payload)?;

    tracing::debug!(stations = stations.len(), "decoded bulletin");

    Ok(Message {
        header: envelope.header,
        indicator: envelope.indicator,
        stations,
    })
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let bytes = *r
        .get(*i..)
        .and_then(<[u8]>::first_chunk::<N>)
        .ok_or(Error::EndOfSlice)?;
    *i += N;

    Ok(bytes)
}

/// Advance the offset over `n` bytes that must be present in the slice.
fn skip_bytes(r: &[u8], i: &mut usize, n: usize) -> Result<(), Error> {
    let end = i.checked_add(n).ok_or(Error::EndOfSlice)?;

    if end > r.len() {
        Err(Error::EndOfSlice)?;
    }

    *i = end;

    Ok(())
}
