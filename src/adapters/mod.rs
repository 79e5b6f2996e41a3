//! Adapters - concrete implementations of ports
//!
//! Adapters connect the application to the board by implementing the port
//! traits.
//!
//! # Available Adapters
//!
//! - **onewire_bus**: DS18B20 sensors on a bit-banged one-wire GPIO
//! - **usb_cdc**: USB CDC serial console

pub mod onewire_bus;
pub mod usb_cdc;

pub use onewire_bus::OneWireBus;
pub use usb_cdc::UsbCdcConsole;
