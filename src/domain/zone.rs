//! Sensor table: logical zones, field labels and bus addresses
//!
//! The table is compiled in with the addresses of the sensors wired at
//! install time. Discovery replaces those addresses with whatever the bus
//! enumerates, slot by slot, so the compiled values only survive for slots
//! the bus could not fill.

use crate::domain::DeviceAddress;

/// Number of sensor slots in the table
pub const SENSOR_COUNT: usize = 5;

/// Zone a sensor reports into.
///
/// Each zone maps to a node key of the downstream collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Between insulation and wall
    InsulationToWall,
    /// Between insulation and panel
    InsulationToPanel,
    /// Room air
    InRoom,
}

impl Zone {
    pub const fn node_key(&self) -> &'static str {
        match self {
            Self::InsulationToWall => "pw7k9YGPzYcgMZrzoSxMOg",
            Self::InsulationToPanel => "u9UQgH7_H-Ka8mPQRhtAiA",
            Self::InRoom => "m0ZmAENUJ0x44x3Ah0xMAw",
        }
    }
}

/// One logical sensor: where it sits, what it is called, which device it is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorRecord {
    pub zone: Zone,
    /// Short field label, `dt1`..`dt5`
    pub field: &'static str,
    pub address: DeviceAddress,
}

impl SensorRecord {
    pub const fn new(zone: Zone, field: &'static str, address: [u8; 8]) -> Self {
        Self {
            zone,
            field,
            address: DeviceAddress::new(address),
        }
    }

    /// Same record bound to another device
    pub const fn with_address(self, address: DeviceAddress) -> Self {
        Self { address, ..self }
    }
}

/// Fixed table of [`SENSOR_COUNT`] sensor records, indexed 0..SENSOR_COUNT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorTable {
    records: [SensorRecord; SENSOR_COUNT],
}

impl SensorTable {
    /// Addresses of the sensors wired at install time
    pub const INSTALLED: Self = Self::new([
        SensorRecord::new(
            Zone::InsulationToWall,
            "dt1",
            [0x28, 0xFF, 0x48, 0x0E, 0x61, 0x16, 0x03, 0x20],
        ),
        SensorRecord::new(
            Zone::InsulationToWall,
            "dt2",
            [0x28, 0xFF, 0xC6, 0x20, 0x62, 0x16, 0x03, 0xC8],
        ),
        SensorRecord::new(
            Zone::InsulationToWall,
            "dt3",
            [0x28, 0xFF, 0xF1, 0x66, 0x63, 0x16, 0x03, 0x5F],
        ),
        SensorRecord::new(
            Zone::InsulationToWall,
            "dt4",
            [0x28, 0xFF, 0x29, 0x02, 0x36, 0x16, 0x03, 0xEF],
        ),
        SensorRecord::new(
            Zone::InsulationToWall,
            "dt5",
            [0x28, 0xFF, 0x2F, 0x49, 0x63, 0x16, 0x04, 0xCA],
        ),
    ]);

    pub const fn new(records: [SensorRecord; SENSOR_COUNT]) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SensorRecord; SENSOR_COUNT] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SensorRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SensorRecord> {
        self.records.iter()
    }

    /// Rebind slot `index` to `address`; out-of-range indices are ignored
    pub(crate) fn bind(&mut self, index: usize, address: DeviceAddress) {
        if let Some(record) = self.records.get_mut(index) {
            *record = record.with_address(address);
        }
    }
}

impl Default for SensorTable {
    fn default() -> Self {
        Self::INSTALLED
    }
}
