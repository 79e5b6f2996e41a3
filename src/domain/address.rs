//! One-wire device address (ROM code)
//!
//! Every device on a one-wire bus carries a factory-programmed 64-bit ROM
//! code: one family-code byte, six serial-number bytes and one CRC byte.

use core::fmt;

/// Family code shared by DS18B20 sensors
pub const DS18B20_FAMILY_CODE: u8 = 0x28;

/// 8-byte hardware identifier of one device on the bus.
///
/// Bytes are kept in bus order: `0[0]` is the family code, `0[7]` the CRC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(pub [u8; 8]);

impl DeviceAddress {
    /// Build an address from its bus-order bytes
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Build an address from the 64-bit ROM code as read off the bus
    /// (family code in the least significant byte).
    pub const fn from_rom_code(code: u64) -> Self {
        Self(code.to_le_bytes())
    }

    /// 64-bit ROM code with the family code in the least significant byte
    pub const fn rom_code(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }

    pub const fn family_code(&self) -> u8 {
        self.0[0]
    }
}

/// Zero-padded upper-case hex, 16 digits, no separators
impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
