//! In-memory port implementations for host tests

use crate::domain::{DeviceAddress, Resolution, DEVICE_DISCONNECTED_C};
use crate::ports::bus::{BusError, TemperatureBus};
use crate::ports::console::{Console, ConsoleError};
use embedded_hal_async::delay::DelayNs;
use std::collections::HashMap;

/// Calls made against [`MockBus`], in order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusCall {
    ResetSearch,
    SearchNext,
    RequestTemperatures,
    Temperature(DeviceAddress),
    SetResolution(DeviceAddress, Resolution),
}

/// Simulated bus holding a fixed list of devices in enumeration order
#[derive(Debug, Default)]
pub struct MockBus {
    pub devices: Vec<DeviceAddress>,
    pub temperatures: HashMap<DeviceAddress, f32>,
    pub resolutions: HashMap<DeviceAddress, Resolution>,
    pub parasite: bool,
    /// Addresses whose `set_resolution` fails
    pub stuck: Vec<DeviceAddress>,
    pub calls: Vec<BusCall>,
    cursor: usize,
}

impl MockBus {
    /// Bus with `count` devices, `sim_address(0..count)`, all at 12 bits
    pub fn with_devices(count: u8) -> Self {
        let devices: Vec<DeviceAddress> = (0..count).map(sim_address).collect();
        let resolutions = devices.iter().map(|a| (*a, Resolution::Bits12)).collect();
        Self {
            devices,
            resolutions,
            ..Default::default()
        }
    }

    pub fn set_temperature(&mut self, address: DeviceAddress, temperature_c: f32) {
        self.temperatures.insert(address, temperature_c);
    }

    pub fn count_calls(&self, wanted: fn(&BusCall) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }

    fn present(&self, address: &DeviceAddress) -> bool {
        self.devices.contains(address)
    }
}

/// Deterministic simulated DS18B20 address for device `n`
pub fn sim_address(n: u8) -> DeviceAddress {
    DeviceAddress::new([0x28, 0xAA, n, 0x00, 0x00, 0x00, 0x00, n ^ 0x5A])
}

impl TemperatureBus for MockBus {
    fn reset_search(&mut self) {
        self.calls.push(BusCall::ResetSearch);
        self.cursor = 0;
    }

    async fn search_next(&mut self) -> Option<DeviceAddress> {
        self.calls.push(BusCall::SearchNext);
        let found = self.devices.get(self.cursor).copied();
        if found.is_some() {
            self.cursor += 1;
        }
        found
    }

    async fn device_count(&mut self) -> u8 {
        self.devices.len() as u8
    }

    async fn is_parasite_power_mode(&mut self) -> bool {
        self.parasite
    }

    async fn request_temperatures(&mut self) {
        self.calls.push(BusCall::RequestTemperatures);
    }

    async fn temperature_c(&mut self, address: &DeviceAddress) -> f32 {
        self.calls.push(BusCall::Temperature(*address));
        if !self.present(address) {
            return DEVICE_DISCONNECTED_C;
        }
        self.temperatures
            .get(address)
            .copied()
            .unwrap_or(DEVICE_DISCONNECTED_C)
    }

    async fn set_resolution(
        &mut self,
        address: &DeviceAddress,
        resolution: Resolution,
    ) -> Result<(), BusError> {
        self.calls.push(BusCall::SetResolution(*address, resolution));
        if !self.present(address) {
            return Err(BusError::NoPresence);
        }
        if self.stuck.contains(address) {
            return Err(BusError::CrcMismatch);
        }
        self.resolutions.insert(*address, resolution);
        Ok(())
    }

    async fn resolution(&mut self, address: &DeviceAddress) -> Option<Resolution> {
        if !self.present(address) {
            return None;
        }
        self.resolutions.get(address).copied()
    }
}

/// Console capturing everything written to it
#[derive(Debug, Default)]
pub struct MockConsole {
    pub output: String,
    /// Fail every write once this many writes have succeeded
    pub fail_after: Option<usize>,
    writes: usize,
}

impl MockConsole {
    /// Console whose writes fail once `limit` writes have gone through
    pub fn failing_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            ..Default::default()
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.output.split("\r\n").collect()
    }
}

impl Console for MockConsole {
    async fn write_str(&mut self, s: &str) -> Result<(), ConsoleError> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(ConsoleError::Disconnected);
        }
        self.writes += 1;
        self.output.push_str(s);
        Ok(())
    }
}

/// Delay that returns immediately and records what it was asked for
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
    pub waits_ns: Vec<u32>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
