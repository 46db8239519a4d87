//! Fixed-capacity queue of received segments.

use log::warn;
use thiserror::Error;

use crate::{avec::SegmentSink, segment::Segment};

/// Default number of segments held by a [`SegmentBuffer`].
pub const DEFAULT_CAPACITY: usize = 8;

/// What to do with a segment arriving at a full buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Keep the queued segments and hand the new one back.
    #[default]
    Reject,
    /// Drop the oldest queued segment to make room.
    EvictOldest,
}

/// The buffer was full and the segment was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Segment buffer is full.")]
pub struct BufferFull(pub Segment);

/// First-in, first-out queue of up to `N` segments.
#[derive(Debug)]
pub struct SegmentBuffer<const N: usize = DEFAULT_CAPACITY> {
    slots: [Option<Segment>; N],
    head: usize,
    len: usize,
    policy: OverflowPolicy,
}

impl<const N: usize> SegmentBuffer<N> {
    pub fn new(policy: OverflowPolicy) -> Self {
        const { assert!(N > 0, "segment buffer capacity must be non-zero") };

        Self {
            slots: [const { None }; N],
            head: 0,
            len: 0,
            policy,
        }
    }

    /// Queue a segment.
    ///
    /// On a full buffer, the [`OverflowPolicy`] decides: `Reject` returns
    /// the segment inside [`BufferFull`], `EvictOldest` returns the evicted
    /// segment.
    pub fn push(&mut self, segment: Segment) -> Result<Option<Segment>, BufferFull> {
        let evicted = if self.is_full() {
            match self.policy {
                OverflowPolicy::Reject => return Err(BufferFull(segment)),
                OverflowPolicy::EvictOldest => self.pop(),
            }
        } else {
            None
        };

        let tail = (self.head + self.len) % N;
        self.slots[tail] = Some(segment);
        self.len += 1;

        Ok(evicted)
    }

    /// Take the oldest segment, if any.
    pub fn pop(&mut self) -> Option<Segment> {
        if self.len == 0 {
            return None;
        }

        let segment = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        segment
    }

    /// The oldest segment, if any, without removing it.
    pub fn peek(&self) -> Option<&Segment> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.head = 0;
        self.len = 0;
    }
}

impl<const N: usize> Default for SegmentBuffer<N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::default())
    }
}

/// Segments are queued subject to the buffer's policy. Rejected segments are
/// dropped; use [`SegmentBuffer::push`] directly to observe them.
impl<const N: usize> SegmentSink for SegmentBuffer<N> {
    fn add_segment(&mut self, segment: Segment) {
        if self.push(segment).is_err() {
            warn!("Dropped segment, buffer full ({N} queued).");
        }
    }
}
