#![cfg_attr(not(test), no_std)]

//! A decoder for WMO BUFR wind profiler bulletins.
//!
//! Windsock turns a bulletin (an 18-byte heading, a BUFR envelope, and a
//! bit-packed tree of stations, observations and atmospheric layers) into a
//! typed [`Message`] with physically scaled values.
//!
//! Most users should begin with the functions in the [`avec`] module, which
//! decode a whole bulletin from a slice or a reader. The [`sans`] module
//! exposes the underlying pieces (bit cursor, section scanner and record
//! decoder) for applications that need finer control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based decoder and wind direction and speed
//!   accessors (default).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Lets the derive macro name this crate by path from inside it.
extern crate self as windsock;

pub mod avec;
pub mod message;
pub mod sans;

pub use avec::decode_slice as decode;
pub use message::{Layer, Message, Observation, Quality, Station};
