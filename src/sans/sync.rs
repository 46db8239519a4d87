//! State scanning for the synchronization marker.

use either::Either::{self, Left, Right};

use crate::segment::SYNC_MARKER;

use super::header::Length;

/// State token to scan for the synchronization marker.
///
/// Holds the last four bytes seen, so garbage and partial markers preceding
/// the real one are skipped without rescanning.
#[derive(Debug, Clone)]
pub struct Marker {
    window: [u8; 4],
}

impl Marker {
    pub fn new() -> Self {
        // Zero never appears first in the marker, so an empty window cannot
        // match early.
        Self { window: [0; 4] }
    }

    /// Transition to another state by shifting a byte into the window.
    ///
    /// Returns the length state once the window holds the marker, or this
    /// state to keep scanning.
    pub fn advance(self, r: [u8; 1]) -> Either<Marker, Length> {
        let [_, a, b, c] = self.window;
        let window = [a, b, c, r[0]];

        if window == SYNC_MARKER {
            Right(Length(()))
        } else {
            Left(Marker { window })
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new()
    }
}
