//! Convenience interfaces for common receive and send patterns.
//!
//! The [`Stream`](stream::Stream) drives the finite-state machine from
//! chunks of bytes, publishing to the [`SegmentSink`] trait. The
//! [`Receiver`](receiver::Receiver) and [`Sender`](sender::Sender) wrap a
//! [`Transport`](transport::Transport) for polled, non-blocking use over a
//! serial link. For data already in memory, or behind a blocking reader, see
//! [`decode_slice`] and `decode_reader`.

#[cfg(feature = "std")]
pub mod reader;
pub mod receiver;
pub mod sender;
pub mod slice;
pub mod stream;
pub mod transport;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::segment::Segment;

use stream::Error;

/// Receive decoded segments.
///
/// See [`crate::buffer::SegmentBuffer`] for a bounded implementation.
#[allow(unused_variables)]
pub trait SegmentSink {
    /// Add a complete, checksum-valid segment.
    fn add_segment(&mut self, segment: Segment);

    /// Observe a discarded frame or a sync timeout. Decoding has already
    /// resumed scanning for the next marker.
    ///
    /// The default implementation ignores errors.
    fn add_error(&mut self, err: &Error) {}
}

#[cfg(feature = "std")]
impl SegmentSink for std::vec::Vec<Segment> {
    fn add_segment(&mut self, segment: Segment) {
        self.push(segment);
    }
}
