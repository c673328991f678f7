//! Convenience interfaces for decoding whole bulletins.
//!
//! The functions in this module decode a bulletin from a slice or a reader
//! into a [`Message`](crate::Message) in one pass. Decoding either succeeds
//! for the whole bulletin or fails; no partial message is returned.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
