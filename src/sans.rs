//! Internal finite-state machine for implementing receivers.
//!
//! This module is intended for applications that need fine control over
//! receiver internals, such as a bootloader driving the machine straight from
//! a UART interrupt. See [`crate::avec`] for drivers covering common receive
//! patterns.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Every token consumes
//! exactly one byte: call its `advance` method with the next byte from the
//! link to obtain a successor state token, along with any extracted data.
//!
//! ```text
//! Marker --> Length --> Kind --> Data* --> Checksum --> (Segment)
//!    ^          |                                 |
//!    +----------+------ error or completion ------+
//! ```
//!
//! Since a token is only ever advanced by a byte that has actually arrived,
//! decoding may stop after any byte and resume later simply by holding on to
//! the current token.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed. Errors and completed segments both end the frame; continue
//! from a fresh [`Decoder`] afterward.
//!
//! Some areas of the receive process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Bounding the number of bytes scanned while searching for the marker.
//!
//! - Buffering completed segments until the application is ready for them.
//!
//! Implementers are recommended to begin by studying and modifying
//! [`crate::avec::stream::Stream`].

pub mod check;
pub mod data;
pub mod header;
pub mod sync;

/// Entrypoint to the finite-state machine.
pub type Decoder = sync::Marker;
