//! Low-level building blocks for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! A bulletin is decoded in two stages.
//!
//! The envelope is walked by the state tokens in [`envelope`]. Every state is
//! represented by a non-copy token that only its predecessor can create. The
//! tokens are zero-size, except [`envelope::Section`], which records the
//! section it expects next. Once enough bytes are ready, transition to another
//! state by calling the token's `advance` method, which returns a successor
//! token along with any extracted data. Skipped sections only report how many
//! bytes to pass over, and never look at their content.
//!
//! The final token, [`envelope::Payload`], hands the packed data section to
//! the record decoder in [`record`]. Records are read with a [`BitCursor`]
//! owned by the decode call, and the raw integers are mapped to physical
//! units by the functions in [`table`].
//!
//! Some parts of the process are not represented by the state tokens and
//! must be carefully written by implementers:
//!
//! - Reading bytes from the correct place in the bulletin, including skipping
//!   the number of bytes reported by each [`envelope::Section`].
//!
//! - Passing exactly the declared number of data section bytes to
//!   [`envelope::Payload`], which bounds the bits consumed.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod cursor;
pub mod envelope;
pub mod record;
pub mod table;

pub use cursor::BitCursor;

/// Entrypoint to the envelope state tokens.
pub type Scanner = envelope::BulletinHeader;
