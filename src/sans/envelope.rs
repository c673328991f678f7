//! States walking the bulletin heading and BUFR sections.

use alloc::vec::Vec;

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::FromBytes;

use crate::message::Station;

use super::record::{self, TruncatedRecord};

/// Length of the bulletin heading preceding the BUFR indicator section.
pub const HEADER_LEN: usize = 18;
/// Length of the indicator section (section 0).
pub const INDICATOR_LEN: usize = 8;
/// Marker opening the indicator section.
pub const MAGIC: &[u8; 4] = b"BUFR";

/// Length-prefixed sections passed over before the data section.
const SKIPPED_SECTIONS: [u8; 2] = [1, 3];

const DATA_SECTION: u8 = 4;

/// An error advancing over the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Incorrect indicator section marker.
    #[error("bad magic")]
    BadMagic,
    /// Declared section length shorter than the section's own header.
    #[error("Section {section} declares length {length}, below the minimum of {minimum}.")]
    SectionLength {
        section: u8,
        length: u32,
        minimum: u32,
    },
}

/// Read a 3-byte big-endian length.
fn int24(r: [u8; 3]) -> u32 {
    let [b0, b1, b2] = r;
    u32::from_be_bytes([0, b0, b1, b2])
}

/// State token to pass over the bulletin heading.
#[derive(Debug)]
pub struct BulletinHeader;

impl BulletinHeader {
    /// Transition to another state by reading the bulletin heading.
    ///
    /// The heading is not interpreted. Returns it unchanged, and a successor
    /// state token.
    pub fn advance(r: [u8; HEADER_LEN]) -> ([u8; HEADER_LEN], Indicator) {
        (r, Indicator(()))
    }
}

/// Contents of the indicator section, surfaced for information only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorSection {
    /// Total length of the BUFR message in bytes, as declared.
    pub total_length: u32,
    /// BUFR edition number.
    pub edition: u8,
}

/// State token to decode the indicator section.
#[derive(Debug)]
pub struct Indicator(pub(super) ());

impl Indicator {
    /// Transition to another state by decoding the indicator section.
    ///
    /// Returns the section contents, and a successor state token.
    pub fn advance(
        self,
        r: [u8; INDICATOR_LEN],
    ) -> Result<(IndicatorSection, Section), EnvelopeError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct IndicatorBytes {
            magic: [u8; 4],
            total_length: [u8; 3],
            edition: u8,
        }

        let IndicatorBytes {
            magic,
            total_length,
            edition,
        } = zerocopy::transmute!(r);

        if &magic != MAGIC {
            Err(EnvelopeError::BadMagic)?;
        }

        let indicator = IndicatorSection {
            total_length: int24(total_length),
            edition,
        };

        tracing::debug!(
            edition = indicator.edition,
            total_length = indicator.total_length,
            "read indicator section"
        );

        Ok((indicator, Section { index: 0 }))
    }
}

/// State token to pass over a length-prefixed section.
#[derive(Debug)]
pub struct Section {
    index: usize,
}

impl Section {
    /// The section number this token expects next.
    pub fn number(&self) -> u8 {
        SKIPPED_SECTIONS[self.index]
    }

    /// Transition to another state by reading a section's length.
    ///
    /// Returns the number of bytes remaining in the section, which must be
    /// skipped before advancing the successor state token.
    pub fn advance(
        self,
        r: [u8; 3],
    ) -> Result<(usize, Either<Section, DataSection>), EnvelopeError> {
        let section = self.number();
        let length = int24(r);

        if length < 3 {
            Err(EnvelopeError::SectionLength {
                section,
                length,
                minimum: 3,
            })?;
        }

        tracing::trace!(section, length, "skipping section");

        let index = self.index + 1;

        let successor = if index < SKIPPED_SECTIONS.len() {
            Left(Section { index })
        } else {
            Right(DataSection(()))
        };

        Ok((length as usize - 3, successor))
    }
}

/// State token to decode the data section header.
#[derive(Debug)]
pub struct DataSection(pub(super) ());

impl DataSection {
    /// Transition to another state by decoding the data section header.
    ///
    /// Returns the number of packed payload bytes that follow, and a successor
    /// state token.
    pub fn advance(self, r: [u8; 4]) -> Result<(usize, Payload), EnvelopeError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct DataHeader {
            length: [u8; 3],
            _reserved: u8,
        }

        let DataHeader { length, .. } = zerocopy::transmute!(r);
        let length = int24(length);

        if length < 4 {
            Err(EnvelopeError::SectionLength {
                section: DATA_SECTION,
                length,
                minimum: 4,
            })?;
        }

        tracing::trace!(section = DATA_SECTION, length, "reading data section");

        Ok((length as usize - 4, Payload(())))
    }
}

/// State token to decode the packed payload of the data section.
#[derive(Debug)]
pub struct Payload(pub(super) ());

impl Payload {
    /// Decode the stations packed in the payload.
    ///
    /// **This method expects exactly the payload length returned by
    /// [`DataSection::advance`].** The payload's bit length bounds decoding.
    pub fn advance(self, r: &[u8]) -> Result<Vec<Station>, TruncatedRecord> {
        record::decode_stations(r)
    }
}
