//! Temperature bus port - abstraction over the one-wire sensor bus
//!
//! This trait lets discovery and polling drive the sensors without knowing
//! how the bus is electrically driven (bit-banged GPIO, PIO, a bridge chip
//! or a mock). Enumeration, CRC checks and conversion timing all live behind
//! it.

use crate::domain::{DeviceAddress, Resolution};
use core::future::Future;

/// Error type for bus operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Data line stayed low when it should have been released
    BusNotHigh,
    /// Data read back failed its CRC
    CrcMismatch,
    /// Device at the address is not a DS18B20
    UnsupportedDevice,
    /// No device answered the reset pulse
    NoPresence,
    /// Any other protocol failure
    Protocol,
}

/// Port for the sensor bus
///
/// Reads never fail at this boundary: a device that cannot be read reports
/// [`DEVICE_DISCONNECTED_C`](crate::domain::DEVICE_DISCONNECTED_C) instead.
///
/// # Example Implementation
///
/// ```ignore
/// struct OneWireBus<'d> {
///     wire: OneWire<OutputOpenDrain<'d>>,
///     search: Option<SearchState>,
/// }
///
/// impl TemperatureBus for OneWireBus<'_> {
///     async fn search_next(&mut self) -> Option<DeviceAddress> {
///         let found = self.wire.device_search(self.search.as_ref(), false, &mut Delay);
///         let (address, state) = found.ok()??;
///         self.search = Some(state);
///         Some(DeviceAddress::from_rom_code(address.0))
///     }
///     // ...
/// }
/// ```
pub trait TemperatureBus {
    /// Restart enumeration so the next [`search_next`](Self::search_next)
    /// returns the first device again
    fn reset_search(&mut self);

    /// Next device in enumeration order, `None` once the bus is exhausted
    /// (or shorted, or empty)
    ///
    /// The order is deterministic for a given set of devices.
    fn search_next(&mut self) -> impl Future<Output = Option<DeviceAddress>>;

    /// Number of devices currently answering on the bus
    fn device_count(&mut self) -> impl Future<Output = u8>;

    /// Whether any device draws power from the data line
    fn is_parasite_power_mode(&mut self) -> impl Future<Output = bool>;

    /// Start a conversion on every device and wait until it completes
    fn request_temperatures(&mut self) -> impl Future<Output = ()>;

    /// Last converted temperature of the device at `address`, in Celsius,
    /// or the disconnection sentinel
    fn temperature_c(&mut self, address: &DeviceAddress) -> impl Future<Output = f32>;

    /// Set the conversion resolution of the device at `address`
    fn set_resolution(
        &mut self,
        address: &DeviceAddress,
        resolution: Resolution,
    ) -> impl Future<Output = Result<(), BusError>>;

    /// Resolution the device at `address` reports, `None` if it cannot be read
    fn resolution(&mut self, address: &DeviceAddress) -> impl Future<Output = Option<Resolution>>;
}
