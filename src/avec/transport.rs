//! Byte transport trait for serial links.
//!
//! The receiver and sender only need to poll for whatever bytes have arrived
//! and to write whole frames. Port naming, baud rate and timeouts are the
//! implementation's concern.
//!
//! # Possible implementations
//!
//! - On a device: wrap the UART driver's receive ring buffer and transmit
//!   routine
//! - On a host: wrap a serial port opened in non-blocking mode, see
//!   `reader::IoTransport` (requires Cargo feature `std`)
//! - In tests: a scripted double delivering bytes in chosen chunks

/// Transport trait.
pub trait Transport {
    /// The error type returned by transport operations.
    ///
    /// This allows implementations to use their own error types
    /// (e.g., `std::io::Error` for host serial ports, custom errors for UART
    /// peripherals).
    type Error: core::fmt::Debug;

    /// Read whatever bytes are currently available into `buf`, without
    /// blocking.
    ///
    /// Returns the number of bytes read. `Ok(0)` means no bytes are available
    /// right now, which is a normal outcome.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `data` to the link.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_available(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(data)
    }
}
