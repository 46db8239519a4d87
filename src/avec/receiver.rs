//! Polled receiver over a transport.
//!
//! A [`Receiver`] owns its transport, a [`Stream`] and a [`SegmentBuffer`].
//! Call [`Receiver::poll`] from the main loop (or whenever the link signals
//! data) and take completed segments with [`Receiver::pop`]. Nothing blocks:
//! a poll with no bytes available simply returns an empty [`Progress`].

use log::warn;
use thiserror::Error;

use crate::{
    buffer::{BufferFull, DEFAULT_CAPACITY, OverflowPolicy, SegmentBuffer},
    segment::{MAX_FRAME_LEN, Segment},
};

use super::{SegmentSink, stream, stream::Stream, transport::Transport};

/// Bytes requested from the transport per read.
const READ_CHUNK: usize = MAX_FRAME_LEN * 2;

/// Errors occurring while polling a receiver.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// An error from the supplied transport.
    #[error("Transport error: {0:?}")]
    Transport(E),
}

/// Receiver configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bytes scanned for a marker before reporting a sync timeout. `None`
    /// scans indefinitely.
    pub sync_budget: Option<usize>,
    /// What to do when a segment arrives with the buffer full.
    pub overflow: OverflowPolicy,
}

/// Counts of receive outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Segments queued in the buffer.
    pub segments: usize,
    pub sync_timeouts: usize,
    pub framing_errors: usize,
    pub checksum_errors: usize,
    /// Segments lost to a full buffer, whether rejected or evicted.
    pub dropped: usize,
}

impl Progress {
    fn merge(&mut self, other: &Progress) {
        self.segments += other.segments;
        self.sync_timeouts += other.sync_timeouts;
        self.framing_errors += other.framing_errors;
        self.checksum_errors += other.checksum_errors;
        self.dropped += other.dropped;
    }
}

/// Sink queuing segments while counting outcomes.
struct Tally<'a, const N: usize> {
    buffer: &'a mut SegmentBuffer<N>,
    progress: &'a mut Progress,
}

impl<const N: usize> SegmentSink for Tally<'_, N> {
    fn add_segment(&mut self, segment: Segment) {
        match self.buffer.push(segment) {
            Ok(None) => self.progress.segments += 1,
            Ok(Some(_)) => {
                warn!("Evicted oldest segment, buffer full ({N} queued).");
                self.progress.segments += 1;
                self.progress.dropped += 1;
            }
            Err(BufferFull(_)) => {
                warn!("Rejected segment, buffer full ({N} queued).");
                self.progress.dropped += 1;
            }
        }
    }

    fn add_error(&mut self, err: &stream::Error) {
        match err {
            stream::Error::SyncTimeout { .. } => self.progress.sync_timeouts += 1,
            stream::Error::Framing(_) => self.progress.framing_errors += 1,
            stream::Error::ChecksumMismatch { .. } => self.progress.checksum_errors += 1,
        }
    }
}

/// Non-blocking segment receiver.
pub struct Receiver<T: Transport, const N: usize = DEFAULT_CAPACITY> {
    transport: T,
    stream: Stream,
    buffer: SegmentBuffer<N>,
    stats: Progress,
}

impl<T: Transport, const N: usize> Receiver<T, N> {
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            transport,
            stream: Stream::with_sync_budget(config.sync_budget),
            buffer: SegmentBuffer::new(config.overflow),
            stats: Progress::default(),
        }
    }

    /// Read everything the transport has available and decode it.
    ///
    /// Returns the outcomes of this call. A frame left incomplete when the
    /// transport runs dry is resumed by the next call.
    pub fn poll(&mut self) -> Result<Progress, Error<T::Error>> {
        let mut progress = Progress::default();
        let mut buf = [0; READ_CHUNK];

        let result = loop {
            let n = match self.transport.read_available(&mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => n,
                Err(err) => break Err(Error::Transport(err)),
            };

            let mut sink = Tally {
                buffer: &mut self.buffer,
                progress: &mut progress,
            };

            self.stream.feed(&buf[..n], &mut sink);
        };

        self.stats.merge(&progress);

        result.map(|_| progress)
    }

    /// Take the oldest received segment, if any.
    pub fn pop(&mut self) -> Option<Segment> {
        self.buffer.pop()
    }

    pub fn segment_available(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Outcomes accumulated over every poll.
    pub fn stats(&self) -> Progress {
        self.stats
    }

    /// Abandon any frame in flight and return to scanning for a marker.
    /// Queued segments are kept.
    pub fn reset(&mut self) {
        self.stream.reset();
    }

    /// Whether no frame is in flight.
    pub fn is_idle(&self) -> bool {
        self.stream.is_idle()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport. Queued segments and any frame in flight are
    /// dropped.
    pub fn into_inner(self) -> T {
        self.transport
    }
}
