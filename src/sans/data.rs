//! State processing the data bytes of a frame.

use either::Either::{self, Left, Right};

use crate::segment::MAX_DATA_LEN;

use super::check::Checksum;

/// Fields of a frame received so far.
#[derive(Debug, Clone)]
pub(crate) struct Partial {
    pub(crate) length: u8,
    pub(crate) kind: u8,
    pub(crate) payload: [u8; MAX_DATA_LEN],
    pub(crate) filled: u8,
}

/// State token to decode a data byte.
#[derive(Debug)]
pub struct Data(pub(super) Partial);

impl Data {
    /// Transition to another state by decoding one data byte.
    ///
    /// Returns this state while data bytes remain, then the checksum state.
    pub fn advance(self, r: [u8; 1]) -> Either<Data, Checksum> {
        let mut partial = self.0;

        partial.payload[partial.filled as usize] = r[0];
        partial.filled += 1;

        if partial.filled < partial.length {
            Left(Data(partial))
        } else {
            Right(Checksum(partial))
        }
    }

    /// Number of data bytes still expected.
    pub fn remaining(&self) -> usize {
        (self.0.length - self.0.filled) as usize
    }
}
