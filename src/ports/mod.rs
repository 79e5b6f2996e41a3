//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how discovery and polling reach the
//! outside world:
//!
//! - **TemperatureBus**: the one-wire sensor bus (DS18B20 driver, mock)
//! - **Console**: where text output goes (USB CDC, mock)
//!
//! The end-of-cycle pause uses `embedded_hal_async::delay::DelayNs`
//! directly, so any embassy or HAL delay plugs in unchanged.

pub mod bus;
pub mod console;

#[cfg(test)]
pub(crate) mod mock;

pub use bus::{BusError, TemperatureBus};
pub use console::{Console, ConsoleError, LINE_CAPACITY, NEWLINE};
