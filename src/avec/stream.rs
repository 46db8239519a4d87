//! Resumable decoder fed by arbitrary chunks of bytes.

use core::mem;

use either::Either::{Left, Right};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::{
    sans::{
        Decoder,
        check::{Checksum, ChecksumError},
        data::Data,
        header::{Kind, Length, LengthError},
        sync::Marker,
    },
    segment::Segment,
};

use super::SegmentSink;

/// Errors occurring while decoding a stream. All are recoverable: the
/// stream is already scanning for the next marker when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No marker found within the configured scan budget.
    #[error("No sync marker found in {scanned} bytes.")]
    SyncTimeout { scanned: usize },
    /// Length field out of range.
    #[error("Framing error: length {0} out of range.")]
    Framing(u8),
    /// Calculated and found checksum values do not match.
    #[error("Calculated ({calculated:#04x}) and found ({found:#04x}) checksums do not match.")]
    ChecksumMismatch { found: u8, calculated: u8 },
}

impl From<LengthError> for Error {
    fn from(err: LengthError) -> Self {
        match err {
            LengthError::OutOfRange(n) => Self::Framing(n),
        }
    }
}

impl From<ChecksumError> for Error {
    fn from(ChecksumError { found, calculated }: ChecksumError) -> Self {
        Self::ChecksumMismatch { found, calculated }
    }
}

/// Any state token of the finite-state machine.
#[derive(Debug)]
enum State {
    Marker(Marker),
    Length(Length),
    Kind(Kind),
    Data(Data),
    Checksum(Checksum),
}

impl Default for State {
    fn default() -> Self {
        State::Marker(Decoder::new())
    }
}

/// A decoder that can be suspended between any two bytes.
///
/// Bytes may be supplied in chunks of any size, including empty ones, and
/// split at any point; the resulting segments are the same as if the whole
/// input had been supplied at once.
#[derive(Debug, Default)]
pub struct Stream {
    state: State,
    sync_budget: Option<usize>,
    scanned: usize,
}

impl Stream {
    /// Create a stream that scans for the marker indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream reporting [`Error::SyncTimeout`] after every
    /// `budget` bytes scanned without finding a marker. A budget of `None`
    /// scans indefinitely.
    pub fn with_sync_budget(budget: Option<usize>) -> Self {
        Self {
            sync_budget: budget,
            ..Self::default()
        }
    }

    /// Decode a single byte.
    ///
    /// Returns a segment if this byte completed a valid frame.
    pub fn push(&mut self, b: u8) -> Result<Option<Segment>, Error> {
        let r = [b];

        let (state, out) = match mem::take(&mut self.state) {
            State::Marker(state) => match state.advance(r) {
                Left(state) => {
                    self.scanned += 1;

                    if self.sync_budget.is_some_and(|n| self.scanned >= n) {
                        let scanned = mem::take(&mut self.scanned);
                        warn!("No sync marker found in {scanned} bytes.");
                        (State::Marker(state), Err(Error::SyncTimeout { scanned }))
                    } else {
                        (State::Marker(state), Ok(None))
                    }
                }
                Right(state) => {
                    trace!("Acquired sync after {} bytes.", self.scanned + 1);
                    self.scanned = 0;
                    (State::Length(state), Ok(None))
                }
            },
            State::Length(state) => match state.advance(r) {
                Ok(state) => (State::Kind(state), Ok(None)),
                Err(err) => {
                    warn!("Discarding frame: {err}");
                    (State::default(), Err(err.into()))
                }
            },
            State::Kind(state) => match state.advance(r) {
                Left(state) => (State::Data(state), Ok(None)),
                Right(state) => (State::Checksum(state), Ok(None)),
            },
            State::Data(state) => match state.advance(r) {
                Left(state) => (State::Data(state), Ok(None)),
                Right(state) => (State::Checksum(state), Ok(None)),
            },
            State::Checksum(state) => match state.advance(r) {
                Ok(segment) => {
                    debug!(
                        "Received segment (type {:#04x}, {} bytes).",
                        segment.kind(),
                        segment.len()
                    );
                    (State::default(), Ok(Some(segment)))
                }
                Err(err) => {
                    warn!("Discarding frame: {err}");
                    (State::default(), Err(err.into()))
                }
            },
        };

        self.state = state;
        out
    }

    /// Decode a chunk of bytes, publishing segments and errors to a sink.
    ///
    /// Returns the number of segments published.
    pub fn feed(&mut self, r: &[u8], o: &mut (impl SegmentSink + ?Sized)) -> usize {
        let mut count = 0;

        for b in r {
            match self.push(*b) {
                Ok(Some(segment)) => {
                    o.add_segment(segment);
                    count += 1;
                }
                Ok(None) => (),
                Err(err) => o.add_error(&err),
            }
        }

        count
    }

    /// Abandon any frame in flight and return to scanning for a marker.
    pub fn reset(&mut self) {
        self.state = State::default();
        self.scanned = 0;
    }

    /// Whether the stream is scanning for a marker, with no frame in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Marker(_))
    }
}
