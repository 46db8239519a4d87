//! The unit of transfer and its wire encoding.
//!
//! Each segment is sent as a single frame:
//!
//! ```text
//! [SYNC 4] [LENGTH 1] [TYPE 1] [DATA LENGTH] [CHECKSUM 1]
//! ```
//!
//! See [`crate::sans::check`] for the checksum definition.

use thiserror::Error;
use tinyvec::ArrayVec;
use zerocopy::{Immutable, IntoBytes};

use crate::sans::check::segment_crc;

/// Synchronization marker preceding every frame.
pub const SYNC_MARKER: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

/// Maximum number of data bytes carried by one segment.
pub const MAX_DATA_LEN: usize = 32;

/// Size of a frame carrying no data.
pub const MIN_FRAME_LEN: usize = SYNC_MARKER.len() + 3;

/// Size of a frame carrying [`MAX_DATA_LEN`] bytes.
pub const MAX_FRAME_LEN: usize = MIN_FRAME_LEN + MAX_DATA_LEN;

/// Filler for unused payload bytes and firmware image padding.
pub const PAD_BYTE: u8 = 0xFF;

/// Transport word size. Firmware images are padded to a multiple of this.
pub const WORD_SIZE: usize = 4;

/// An encoded frame, ready to be written to a transport.
pub type Frame = ArrayVec<[u8; MAX_FRAME_LEN]>;

/// Data too long to fit in a single segment.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Payload of {0} bytes exceeds the {max} byte segment capacity.", max = MAX_DATA_LEN)]
pub struct PayloadTooLarge(pub usize);

/// A complete, checksum-valid segment.
///
/// Segments are only produced by [`Segment::new`] and by the decoder once a
/// frame's checksum has been verified. Bytes of the payload beyond
/// [`Segment::len`] always hold [`PAD_BYTE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub(crate) length: u8,
    pub(crate) kind: u8,
    pub(crate) payload: [u8; MAX_DATA_LEN],
    pub(crate) checksum: u8,
}

impl Segment {
    /// Build a segment of the given type carrying `data`, computing its
    /// checksum.
    pub fn new(kind: u8, data: &[u8]) -> Result<Self, PayloadTooLarge> {
        if data.len() > MAX_DATA_LEN {
            Err(PayloadTooLarge(data.len()))?;
        }

        let mut payload = [PAD_BYTE; MAX_DATA_LEN];
        payload[..data.len()].copy_from_slice(data);

        let length = data.len() as u8;

        Ok(Self {
            length,
            kind,
            payload,
            checksum: segment_crc(length, kind, data),
        })
    }

    /// Number of valid data bytes.
    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The type tag. Its meaning is left to the application.
    pub fn kind(&self) -> u8 {
        self.kind
    }

    /// The valid data bytes.
    pub fn data(&self) -> &[u8] {
        &self.payload[..self.len()]
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Encode this segment as a wire frame, sync marker included.
    pub fn encode(&self) -> Frame {
        #[repr(C)]
        #[derive(IntoBytes, Immutable)]
        struct FrameHeader {
            marker: [u8; 4],
            length: u8,
            kind: u8,
        }

        let header = FrameHeader {
            marker: SYNC_MARKER,
            length: self.length,
            kind: self.kind,
        };

        let mut frame = Frame::new();
        frame.extend_from_slice(header.as_bytes());
        frame.extend_from_slice(self.data());
        frame.push(self.checksum);
        frame
    }
}
