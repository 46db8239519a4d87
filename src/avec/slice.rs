//! Slice-based decoder implementation.

use super::{SegmentSink, stream::Stream};

/// Decode every complete frame in a slice, publishing to a receiver.
///
/// A frame cut off by the end of the slice is dropped. Returns the number
/// of segments published.
///
/// This method is also re-exported as `cassette::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl SegmentSink) -> usize {
    Stream::new().feed(r, o)
}
