#![cfg(feature = "std")]

use std::collections::VecDeque;

use cassette::{
    Segment,
    avec::{
        SegmentSink,
        receiver::{Config, Receiver},
        sender::Sender,
        stream::{Error, Stream},
        transport::Transport,
    },
    buffer::OverflowPolicy,
    pad,
    segment::{MAX_DATA_LEN, SYNC_MARKER},
};

#[derive(Default)]
struct Collector {
    segments: Vec<Segment>,
    errors: Vec<Error>,
}

impl SegmentSink for Collector {
    fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn add_error(&mut self, err: &Error) {
        self.errors.push(*err);
    }
}

/// Deterministic byte source for garbage and payloads.
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 24) as u8
    }

    /// Bytes that can never complete a marker on their own.
    fn garbage(&mut self, n: usize) -> Vec<u8> {
        (0..n)
            .map(|_| match self.next() {
                0x04 => 0x05,
                b => b,
            })
            .collect()
    }
}

fn decode(r: &[u8]) -> Collector {
    let mut o = Collector::default();
    Stream::new().feed(r, &mut o);
    o
}

#[test]
fn resync_after_garbage() {
    let segment = Segment::new(0x00, &[0x48, 0x01]).unwrap();
    let mut rng = Lcg(7);

    let mut prefixes: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x01],
        vec![0x01, 0x02],
        vec![0x01, 0x02, 0x03],
        vec![0x01, 0x02, 0x05],
        vec![0x01, 0x02, 0x03, 0x01, 0x02],
        vec![0x04, 0x03, 0x02, 0x01],
        vec![0x02, 0x03, 0x04],
    ];
    prefixes.extend((0..64).map(|n| rng.garbage(n)));

    for prefix in prefixes {
        let mut r = prefix.clone();
        r.extend_from_slice(&segment.encode());

        let o = decode(&r);
        assert_eq!(o.segments, [segment.clone()], "prefix {prefix:02x?}");
    }
}

#[test]
fn chunking_invariance() {
    let segment = Segment::new(0x11, &[0xA0, 0xA1, 0xA2]).unwrap();
    let mut r = vec![0x01, 0x02, 0xFF];
    r.extend_from_slice(&segment.encode());

    let whole = decode(&r).segments;
    assert_eq!(whole, [segment]);

    // Every partition of the input into non-empty chunks, one per set of
    // split points between bytes.
    let splits = r.len() - 1;
    for mask in 0u32..(1 << splits) {
        let mut stream = Stream::new();
        let mut o = Collector::default();
        let mut start = 0;

        for i in 0..splits {
            if mask & (1 << i) != 0 {
                stream.feed(&r[start..=i], &mut o);
                // A read returning nothing between chunks.
                stream.feed(&[], &mut o);
                start = i + 1;
            }
        }
        stream.feed(&r[start..], &mut o);

        assert_eq!(o.segments, whole, "split mask {mask:#b}");
        assert!(o.errors.is_empty());
    }
}

#[test]
fn single_bit_flips_are_rejected() {
    let segment = Segment::new(0x00, &[0x12, 0x34, 0x56, 0x78]).unwrap();
    let next = Segment::new(0x00, &[0x9A]).unwrap();
    let frame = segment.encode();

    // Type byte and every data byte.
    for byte in 5..frame.len() - 1 {
        for bit in 0..8 {
            let mut r = frame.to_vec();
            r[byte] ^= 1 << bit;
            r.extend_from_slice(&next.encode());

            let o = decode(&r);
            assert_eq!(o.segments, [next.clone()], "byte {byte} bit {bit}");
            assert!(
                matches!(o.errors[..], [Error::ChecksumMismatch { .. }]),
                "byte {byte} bit {bit}"
            );
        }
    }
}

#[test]
fn out_of_range_lengths_resync() {
    let next = Segment::new(0x03, &[0x01, 0x02, 0x03, 0x04]).unwrap();

    for n in (MAX_DATA_LEN as u8 + 1)..=u8::MAX {
        let mut r = SYNC_MARKER.to_vec();
        r.push(n);
        r.extend_from_slice(&next.encode());

        let o = decode(&r);
        assert_eq!(o.errors, [Error::Framing(n)]);
        assert_eq!(o.segments, [next.clone()]);
    }
}

#[test]
fn round_trip() {
    let mut rng = Lcg(42);

    for len in [0, 1, MAX_DATA_LEN] {
        let data: Vec<u8> = (0..len).map(|_| rng.next()).collect();
        let segment = Segment::new(0x5A, &data).unwrap();

        let o = decode(&segment.encode());
        assert_eq!(o.segments.len(), 1);

        let decoded = &o.segments[0];
        assert_eq!(decoded.len(), len);
        assert_eq!(decoded.kind(), 0x5A);
        assert_eq!(decoded.data(), data);
        assert_eq!(decoded.checksum(), segment.checksum());
        assert_eq!(decoded, &segment);
    }
}

#[test]
fn padding_idempotence() {
    for len in 0..=16 {
        let mut image = vec![0x00; len];
        pad::pad(&mut image);
        let aligned = image.len();

        assert_eq!(aligned % 4, 0);
        assert!(aligned - len < 4);
        assert_eq!(pad::check_image(aligned, 0xC000), Ok(()));

        pad::pad(&mut image);
        assert_eq!(image.len(), aligned);
    }
}

/// Shared wire between a sender and a receiver, delivering at most `chunk`
/// bytes per read, with an empty read after each.
#[derive(Default)]
struct Loopback {
    wire: VecDeque<u8>,
    chunk: usize,
    dry: bool,
}

impl Transport for Loopback {
    type Error = ();

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        self.dry = !self.dry;
        if self.dry {
            return Ok(0);
        }

        let n = self.chunk.min(buf.len()).min(self.wire.len());
        for b in &mut buf[..n] {
            *b = self.wire.pop_front().unwrap();
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        self.wire.extend(data);
        Ok(())
    }
}

#[test]
fn image_over_loopback() {
    let mut rng = Lcg(3);
    let mut image: Vec<u8> = (0..301).map(|_| rng.next()).collect();
    pad::pad(&mut image);
    assert_eq!(image.len(), 304);

    let mut link = Loopback {
        chunk: 5,
        ..Loopback::default()
    };

    // Noise on the line before the transfer starts.
    link.wire.extend([0x01, 0x02, 0x03, 0x00, 0xFF]);

    let mut sender = Sender::new(&mut link);
    assert_eq!(sender.send_image(0x00, &image).unwrap(), 10);

    let mut receiver: Receiver<_> = Receiver::new(
        &mut link,
        Config {
            sync_budget: Some(64),
            overflow: OverflowPolicy::Reject,
        },
    );

    let mut received = Vec::new();
    for _ in 0..200 {
        // Reads alternate with dry reads, so each poll sees one chunk.
        receiver.poll().unwrap();
        while let Some(segment) = receiver.pop() {
            received.extend_from_slice(segment.data());
        }
    }

    assert_eq!(received, image);

    let stats = receiver.stats();
    assert_eq!(stats.segments, 10);
    assert_eq!(stats.dropped, 0);
    assert_eq!(stats.checksum_errors + stats.framing_errors, 0);
}
