//! USB CDC console adapter
//!
//! This adapter implements the Console trait for USB CDC ACM
//! (serial over USB), so the readings show up in any serial terminal.

use crate::ports::console::{Console, ConsoleError};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::{Driver, EndpointError};

/// USB packet size (CDC ACM max)
const USB_PACKET_SIZE: usize = 64;

/// USB CDC console adapter
///
/// Text is written as raw bytes in 64-byte packets. While no terminal holds
/// DTR the output is dropped, like a UART with nothing attached.
pub struct UsbCdcConsole<'a, D: Driver<'a>> {
    /// USB CDC ACM class instance
    class: CdcAcmClass<'a, D>,
}

impl<'a, D: Driver<'a>> UsbCdcConsole<'a, D> {
    /// Create a new USB CDC console
    pub fn new(class: CdcAcmClass<'a, D>) -> Self {
        Self { class }
    }

    /// Wait until a host opens the port
    pub async fn wait_connection(&mut self) {
        self.class.wait_connection().await;
    }

    /// Whether a terminal currently holds DTR
    pub fn is_connected(&self) -> bool {
        self.class.dtr()
    }
}

impl<'a, D: Driver<'a>> Console for UsbCdcConsole<'a, D> {
    async fn write_str(&mut self, s: &str) -> Result<(), ConsoleError> {
        if !self.is_connected() {
            return Ok(());
        }

        for chunk in s.as_bytes().chunks(USB_PACKET_SIZE) {
            self.class.write_packet(chunk).await.map_err(|e| match e {
                EndpointError::Disabled => ConsoleError::Disconnected,
                _ => ConsoleError::SendFailed,
            })?;
        }
        Ok(())
    }
}
