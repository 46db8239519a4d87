#![cfg(feature = "std")]

use std::io::Cursor;

use cassette::{
    Segment,
    avec::{SegmentSink, stream::Error, stream::Stream},
};
use csv::ReaderBuilder;

const PATH: &str = "fixtures/frames.csv";

#[test]
fn decode_slice_fixtures() {
    for vector in vectors() {
        let mut validator = Validator::default();
        cassette::avec::decode_slice(&vector.input, &mut validator);
        validator.check(&vector);
    }
}

#[test]
fn decode_reader_fixtures() {
    for vector in vectors() {
        let mut validator = Validator::default();
        cassette::avec::decode_reader(&mut Cursor::new(&vector.input), &mut validator).unwrap();
        validator.check(&vector);
    }
}

#[test]
fn decode_stream_bytewise_fixtures() {
    for vector in vectors() {
        let mut validator = Validator::default();
        let mut stream = Stream::new();
        for b in &vector.input {
            stream.feed(&[*b], &mut validator);
            stream.feed(&[], &mut validator);
        }
        validator.check(&vector);
    }
}

#[test]
fn decode_all_fixtures_back_to_back() {
    let vectors = vectors();
    let input: Vec<u8> = vectors.iter().flat_map(|v| v.input.clone()).collect();

    let mut validator = Validator::default();
    cassette::avec::decode_slice(&input, &mut validator);

    let expected: Vec<Segment> = vectors.iter().filter_map(|v| v.segment()).collect();
    assert_eq!(validator.segments, expected);
}

struct Vector {
    label: String,
    input: Vec<u8>,
    outcome: String,
    kind: Option<u8>,
    data: Vec<u8>,
}

impl Vector {
    fn segment(&self) -> Option<Segment> {
        self.kind.map(|kind| Segment::new(kind, &self.data).unwrap())
    }
}

fn vectors() -> Vec<Vector> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(PATH)
        .unwrap();

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            Vector {
                label: r[0].to_string(),
                input: hex(&r[1]),
                outcome: r[2].to_string(),
                kind: (!r[3].is_empty()).then(|| hex(&r[3])[0]),
                data: hex(&r[4]),
            }
        })
        .collect()
}

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

#[derive(Default)]
struct Validator {
    segments: Vec<Segment>,
    errors: Vec<Error>,
}

impl Validator {
    fn check(&self, vector: &Vector) {
        let label = &vector.label;

        match vector.outcome.as_str() {
            "segment" => {
                assert_eq!(self.segments.len(), 1, "{label}");
                let segment = &self.segments[0];
                assert_eq!(Some(segment.kind()), vector.kind, "{label}");
                assert_eq!(segment.data(), vector.data, "{label}");
                assert_eq!(Some(segment.clone()), vector.segment(), "{label}");
                assert!(self.errors.is_empty(), "{label}");
            }
            "checksum" => {
                assert!(self.segments.is_empty(), "{label}");
                assert!(
                    matches!(self.errors[..], [Error::ChecksumMismatch { .. }]),
                    "{label}"
                );
            }
            "framing" => {
                assert!(self.segments.is_empty(), "{label}");
                assert!(matches!(self.errors[..], [Error::Framing(_)]), "{label}");
            }
            "none" => {
                assert!(self.segments.is_empty(), "{label}");
                assert!(self.errors.is_empty(), "{label}");
            }
            other => panic!("Unknown outcome {other} in {label}"),
        }
    }
}

impl SegmentSink for Validator {
    fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn add_error(&mut self, err: &Error) {
        self.errors.push(*err);
    }
}
