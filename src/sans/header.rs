//! States processing the length and type fields of a frame.

use either::Either::{self, Left, Right};
use thiserror::Error;

use crate::segment::{MAX_DATA_LEN, PAD_BYTE};

use super::{check::Checksum, data::Data, data::Partial};

/// An error advancing over a length field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LengthError {
    /// Length exceeds the segment capacity.
    #[error("Length {0} exceeds the {max} byte segment capacity.", max = MAX_DATA_LEN)]
    OutOfRange(u8),
}

/// State token to decode the length field.
#[derive(Debug)]
pub struct Length(pub(super) ());

impl Length {
    /// Transition to another state by decoding a length field.
    ///
    /// Returns a successor state token, or an error if the length is out of
    /// range. No data bytes are consumed in that case.
    pub fn advance(self, r: [u8; 1]) -> Result<Kind, LengthError> {
        let length = r[0];

        if length as usize > MAX_DATA_LEN {
            Err(LengthError::OutOfRange(length))?;
        }

        Ok(Kind { length })
    }
}

/// State token to decode the type field.
#[derive(Debug)]
pub struct Kind {
    pub(super) length: u8,
}

impl Kind {
    /// Transition to another state by decoding a type field.
    ///
    /// Returns the data state, or the checksum state directly for frames
    /// carrying no data.
    pub fn advance(self, r: [u8; 1]) -> Either<Data, Checksum> {
        let partial = Partial {
            length: self.length,
            kind: r[0],
            payload: [PAD_BYTE; MAX_DATA_LEN],
            filled: 0,
        };

        if self.length != 0 {
            Left(Data(partial))
        } else {
            Right(Checksum(partial))
        }
    }
}
