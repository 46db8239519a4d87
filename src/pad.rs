//! Preparing firmware images for transport.
//!
//! Images are sent as whole transport words, so their length must be a
//! multiple of [`WORD_SIZE`] before the first segment goes out. Padding to
//! that alignment is distinct from padding to an exact size, such as the
//! size of a flash partition; [`pad`] does the former, [`pad_to_size`] the
//! latter.

use thiserror::Error;

use crate::segment::WORD_SIZE;
#[cfg(feature = "std")]
use crate::segment::PAD_BYTE;

/// An image unsuitable for transport.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PadError {
    /// Length is not a multiple of the word size.
    #[error("Length {len} is not a multiple of {word}.", word = WORD_SIZE)]
    NotAligned { len: usize },
    /// Image is larger than allowed.
    #[error("Image of {len} bytes exceeds the {max} byte limit.")]
    TooLarge { len: usize, max: usize },
}

/// Number of filler bytes bringing `len` up to a multiple of `word`.
pub fn padding_len(len: usize, word: usize) -> usize {
    (word - len % word) % word
}

/// Append filler bytes until the image length is a multiple of the word
/// size. Aligned images are left untouched.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn pad(image: &mut std::vec::Vec<u8>) {
    let n = padding_len(image.len(), WORD_SIZE);
    image.resize(image.len() + n, PAD_BYTE);
}

/// Append filler bytes until the image is exactly `target` bytes.
///
/// The target must itself be word aligned, and no smaller than the image.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn pad_to_size(image: &mut std::vec::Vec<u8>, target: usize) -> Result<(), PadError> {
    if target % WORD_SIZE != 0 {
        Err(PadError::NotAligned { len: target })?;
    }

    if image.len() > target {
        Err(PadError::TooLarge {
            len: image.len(),
            max: target,
        })?;
    }

    image.resize(target, PAD_BYTE);

    Ok(())
}

/// Check an image length is ready for transport: word aligned, and no
/// larger than `max` bytes.
pub fn check_image(len: usize, max: usize) -> Result<(), PadError> {
    if len > max {
        Err(PadError::TooLarge { len, max })?;
    }

    if len % WORD_SIZE != 0 {
        Err(PadError::NotAligned { len })?;
    }

    Ok(())
}
