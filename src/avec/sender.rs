//! Frame sender over a transport.

use log::debug;
use thiserror::Error;

use crate::segment::{MAX_DATA_LEN, Segment, WORD_SIZE};

use super::transport::Transport;

/// Errors occurring while sending.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// An error from the supplied transport.
    #[error("Transport error: {0:?}")]
    Transport(E),
    /// Image length is not a multiple of the word size.
    #[error("Image of {len} bytes is not word aligned.")]
    NotAligned { len: usize },
}

/// Writes segments as complete frames, one marker per frame.
pub struct Sender<T: Transport> {
    transport: T,
}

impl<T: Transport> Sender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send one segment, marker included.
    pub fn send(&mut self, segment: &Segment) -> Result<(), Error<T::Error>> {
        debug!(
            "Sending segment (type {:#04x}, {} bytes).",
            segment.kind(),
            segment.len()
        );

        self.transport
            .write(&segment.encode())
            .map_err(Error::Transport)
    }

    /// Send a firmware image as consecutive full segments of the given type.
    ///
    /// The image must already be padded to the word size (see
    /// [`crate::pad`]). Returns the number of segments sent.
    pub fn send_image(&mut self, kind: u8, image: &[u8]) -> Result<usize, Error<T::Error>> {
        if image.len() % WORD_SIZE != 0 {
            Err(Error::NotAligned { len: image.len() })?;
        }

        let mut count = 0;

        for chunk in image.chunks(MAX_DATA_LEN) {
            // Chunks never exceed the segment capacity.
            let Ok(segment) = Segment::new(kind, chunk) else {
                unreachable!()
            };

            self.send(&segment)?;
            count += 1;
        }

        debug!("Sent image ({} bytes, {count} segments).", image.len());

        Ok(count)
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
