//! DS18B20 bus adapter
//!
//! This adapter implements the TemperatureBus trait on top of the
//! `one-wire-bus` and `ds18b20` crates, bit-banging the bus on an
//! open-drain GPIO of the RP2350.

use crate::domain::{DeviceAddress, Resolution, DEVICE_DISCONNECTED_C};
use crate::ports::bus::{BusError, TemperatureBus};
use core::convert::Infallible;
use ds18b20::{Ds18b20, SensorData};
use embassy_rp::gpio::OutputOpenDrain;
use embassy_time::{Delay, Duration, Timer};
use heapless::Vec;
use one_wire_bus::{Address, OneWire, OneWireError, OneWireResult, SearchState};

/// Most devices the adapter keeps track of
pub const MAX_DEVICES: usize = 8;

/// READ POWER SUPPLY: parasite-powered devices pull the following slot low
const READ_POWER_SUPPLY: u8 = 0xB4;

type Wire<'d> = OneWire<OutputOpenDrain<'d>>;

impl From<OneWireError<Infallible>> for BusError {
    fn from(e: OneWireError<Infallible>) -> Self {
        match e {
            OneWireError::BusNotHigh => BusError::BusNotHigh,
            OneWireError::CrcMismatch => BusError::CrcMismatch,
            OneWireError::FamilyCodeMismatch => BusError::UnsupportedDevice,
            _ => BusError::Protocol,
        }
    }
}

/// One-wire bus of DS18B20 sensors on a single GPIO
///
/// Conversions are waited out with `embassy_time`, for the longest
/// conversion time among the resolutions the adapter has seen (12 bits
/// until a device reports otherwise).
pub struct OneWireBus<'d> {
    wire: Wire<'d>,
    delay: Delay,
    /// Enumeration cursor, `None` before the first device
    search: Option<SearchState>,
    search_done: bool,
    /// Last known resolution per device
    known: Vec<(DeviceAddress, Resolution), MAX_DEVICES>,
}

impl<'d> OneWireBus<'d> {
    /// Take over `pin` as the bus data line.
    ///
    /// Fails if the line does not float high once released (missing pull-up
    /// or a shorted bus).
    pub fn new(pin: OutputOpenDrain<'d>) -> Result<Self, BusError> {
        let wire = OneWire::new(pin)?;
        Ok(Self {
            wire,
            delay: Delay,
            search: None,
            search_done: false,
            known: Vec::new(),
        })
    }

    /// Resolution the next conversion has to be waited out for
    pub fn conversion_wait(&self) -> Resolution {
        self.known
            .iter()
            .map(|(_, r)| *r)
            .max()
            .unwrap_or(Resolution::Bits12)
    }

    fn remember(&mut self, address: DeviceAddress, resolution: Resolution) {
        if let Some(entry) = self.known.iter_mut().find(|(a, _)| *a == address) {
            entry.1 = resolution;
            return;
        }
        if self.known.push((address, resolution)).is_err() {
            warn!("device table full, not tracking resolution");
        }
    }

    fn read_sensor(&mut self, address: &DeviceAddress) -> OneWireResult<SensorData, Infallible> {
        let sensor = Ds18b20::new::<Infallible>(Address(address.rom_code()))?;
        sensor.read_data(&mut self.wire, &mut self.delay)
    }

    fn write_resolution(
        &mut self,
        address: &DeviceAddress,
        resolution: Resolution,
    ) -> OneWireResult<(), Infallible> {
        let sensor = Ds18b20::new::<Infallible>(Address(address.rom_code()))?;
        // Keep the alarm thresholds already in the scratchpad
        let current = sensor.read_data(&mut self.wire, &mut self.delay)?;
        sensor.set_config(
            current.alarm_temp_low,
            current.alarm_temp_high,
            to_driver(resolution),
            &mut self.wire,
            &mut self.delay,
        )
    }

    fn read_power_supply(&mut self) -> OneWireResult<bool, Infallible> {
        self.wire
            .send_command(READ_POWER_SUPPLY, None, &mut self.delay)?;
        self.wire.read_bit(&mut self.delay)
    }
}

impl TemperatureBus for OneWireBus<'_> {
    fn reset_search(&mut self) {
        self.search = None;
        self.search_done = false;
    }

    async fn search_next(&mut self) -> Option<DeviceAddress> {
        if self.search_done {
            return None;
        }

        match self
            .wire
            .device_search(self.search.as_ref(), false, &mut self.delay)
        {
            Ok(Some((address, state))) => {
                self.search = Some(state);
                Some(DeviceAddress::from_rom_code(address.0))
            }
            Ok(None) => {
                self.search_done = true;
                None
            }
            Err(e) => {
                warn!("device search failed: {:?}", BusError::from(e));
                self.search_done = true;
                None
            }
        }
    }

    async fn device_count(&mut self) -> u8 {
        let mut codes: Vec<u64, MAX_DEVICES> = Vec::new();
        for found in self.wire.devices(false, &mut self.delay) {
            match found {
                Ok(address) => {
                    if codes.push(address.0).is_err() {
                        warn!("more than {} devices on the bus", MAX_DEVICES);
                        break;
                    }
                }
                Err(e) => {
                    warn!("device count search failed: {:?}", BusError::from(e));
                    break;
                }
            }
        }

        for code in &codes {
            let address = DeviceAddress::from_rom_code(*code);
            if let Ok(data) = self.read_sensor(&address) {
                self.remember(address, from_driver(data.resolution));
            }
        }
        codes.len() as u8
    }

    async fn is_parasite_power_mode(&mut self) -> bool {
        match self.read_power_supply() {
            Ok(externally_powered) => !externally_powered,
            Err(e) => {
                warn!("power supply read failed: {:?}", BusError::from(e));
                false
            }
        }
    }

    async fn request_temperatures(&mut self) {
        let started = ds18b20::start_simultaneous_temp_measurement(&mut self.wire, &mut self.delay);
        if let Err(e) = started {
            warn!("conversion request failed: {:?}", BusError::from(e));
            return;
        }
        let wait = self.conversion_wait();
        trace!("waiting {} us for conversion", wait.conversion_time_us());
        Timer::after(Duration::from_micros(u64::from(wait.conversion_time_us()))).await;
    }

    async fn temperature_c(&mut self, address: &DeviceAddress) -> f32 {
        match self.read_sensor(address) {
            Ok(data) => data.temperature,
            Err(e) => {
                debug!("read failed: {:?}", BusError::from(e));
                DEVICE_DISCONNECTED_C
            }
        }
    }

    async fn set_resolution(
        &mut self,
        address: &DeviceAddress,
        resolution: Resolution,
    ) -> Result<(), BusError> {
        self.write_resolution(address, resolution)?;
        self.remember(*address, resolution);
        Ok(())
    }

    async fn resolution(&mut self, address: &DeviceAddress) -> Option<Resolution> {
        let data = self.read_sensor(address).ok()?;
        let resolution = from_driver(data.resolution);
        self.remember(*address, resolution);
        Some(resolution)
    }
}

fn to_driver(resolution: Resolution) -> ds18b20::Resolution {
    match resolution {
        Resolution::Bits9 => ds18b20::Resolution::Bits9,
        Resolution::Bits10 => ds18b20::Resolution::Bits10,
        Resolution::Bits11 => ds18b20::Resolution::Bits11,
        Resolution::Bits12 => ds18b20::Resolution::Bits12,
    }
}

fn from_driver(resolution: ds18b20::Resolution) -> Resolution {
    match resolution {
        ds18b20::Resolution::Bits9 => Resolution::Bits9,
        ds18b20::Resolution::Bits10 => Resolution::Bits10,
        ds18b20::Resolution::Bits11 => Resolution::Bits11,
        ds18b20::Resolution::Bits12 => Resolution::Bits12,
    }
}
