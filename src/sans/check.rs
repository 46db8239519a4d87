//! Helpers for computing frame checksums, and the final checksum state.
//!
//! Frames are protected by CRC-8 with polynomial `0x07`, an initial value of
//! zero, no reflection and no final XOR (CRC-8/SMBUS). The checksum covers
//! the length byte, the type byte and the valid data bytes, in wire order.
//! Payload padding is not covered.

use thiserror::Error;

use crate::segment::Segment;

use super::data::Partial;

/// Accumulate a slice of bytes into a cyclic redundancy check value.
pub fn compute_crc(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| crc_byte(acc, *b))
}

/// Compute the checksum carried by a frame with the given fields.
pub fn segment_crc(length: u8, kind: u8, data: &[u8]) -> u8 {
    compute_crc(compute_crc(0, &[length, kind]), data)
}

/// Accumulate a single byte into a cyclic redundancy check value.
fn crc_byte(crc: u8, b: u8) -> u8 {
    const CRC_TABLE: [u8; 256] = {
        let mut table = [0; 256];
        let mut i = 0;
        while i < 256 {
            let mut c = i as u8;
            let mut bit = 0;
            while bit < 8 {
                c = if c & 0x80 != 0 { (c << 1) ^ 0x07 } else { c << 1 };
                bit += 1;
            }
            table[i] = c;
            i += 1;
        }
        table
    };

    CRC_TABLE[(crc ^ b) as usize]
}

/// Calculated and found checksum values do not match.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Calculated ({calculated:#04x}) and found ({found:#04x}) checksums do not match.")]
pub struct ChecksumError {
    pub found: u8,
    pub calculated: u8,
}

/// State token to decode the checksum closing a frame.
#[derive(Debug)]
pub struct Checksum(pub(super) Partial);

impl Checksum {
    /// Transition out of the frame by decoding its checksum.
    ///
    /// Returns the completed segment if the checksum matches. Either way, the
    /// frame is finished and decoding continues from a fresh
    /// [`super::Decoder`].
    pub fn advance(self, r: [u8; 1]) -> Result<Segment, ChecksumError> {
        let Partial {
            length,
            kind,
            payload,
            ..
        } = self.0;

        let found = r[0];
        let calculated = segment_crc(length, kind, &payload[..length as usize]);

        if found != calculated {
            Err(ChecksumError { found, calculated })?;
        }

        Ok(Segment {
            length,
            kind,
            payload,
            checksum: found,
        })
    }
}
