//! Reader-based decoder and transport adapter.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read, Write};

use super::{SegmentSink, stream::Stream, transport::Transport};

/// Decode every complete frame from a reader until it reaches end of file,
/// publishing to a receiver.
///
/// Returns the number of segments published. A frame cut off by end of file
/// is dropped.
///
/// This method is also re-exported as `cassette::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl SegmentSink) -> Result<usize, std::io::Error> {
    let mut stream = Stream::new();
    let mut buf = [0; 256];
    let mut count = 0;

    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        count += stream.feed(&buf[..n], o);
    }

    Ok(count)
}

/// Adapts a `std` byte stream, such as a serial port opened with a zero or
/// short timeout, to the [`Transport`] trait.
///
/// Reads that would block, time out or are interrupted report no bytes
/// available rather than an error.
///
/// _Requires Cargo feature `std`._
#[derive(Debug)]
pub struct IoTransport<T> {
    inner: T,
}

impl<T: Read + Write> IoTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> Transport for IoTransport<T> {
    type Error = std::io::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.inner.read(buf) {
            Ok(n) => Ok(n),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)?;
        self.inner.flush()
    }
}
