#![no_std]

//! A framed segment transport for streaming firmware to bootloaders over
//! asynchronous serial links.
//!
//! Each segment travels as a frame: a fixed synchronization marker, a length,
//! a type, up to 32 data bytes and a CRC-8 checksum. Receivers recover frame
//! boundaries from a raw byte stream that may be corrupted, delayed or
//! desynchronized, discarding bad frames and resynchronizing on the next
//! marker.
//!
//! Cassette exposes its underlying finite-state machine in the [`sans`]
//! module for applications needing finer control over internals (such as
//! bootloaders driving it byte by byte from an interrupt). Most users should
//! begin with the drivers in the [`avec`] module.
//!
//! Firmware images must be padded to a multiple of the transport word size
//! before sending; see [`pad`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder, `std::io` transport adapter and
//!   image padding helpers (default).

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

pub mod avec;
pub mod buffer;
pub mod pad;
pub mod sans;
pub mod segment;

pub use segment::Segment;
