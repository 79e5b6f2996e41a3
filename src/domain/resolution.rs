//! Sensor conversion resolution

/// Number of bits of precision a DS18B20 uses per conversion.
///
/// Higher resolution means a longer conversion: the sensor needs up to
/// 750ms at 12 bits and halves that for every bit dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5C steps
    Bits9,
    /// 0.25C steps
    Bits10,
    /// 0.125C steps
    Bits11,
    /// 0.0625C steps (power-on default)
    Bits12,
}

impl Resolution {
    /// Resolution from its bit count, `None` outside 9..=12
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Self::Bits9),
            10 => Some(Self::Bits10),
            11 => Some(Self::Bits11),
            12 => Some(Self::Bits12),
            _ => None,
        }
    }

    pub const fn bits(&self) -> u8 {
        match self {
            Self::Bits9 => 9,
            Self::Bits10 => 10,
            Self::Bits11 => 11,
            Self::Bits12 => 12,
        }
    }

    /// Worst-case conversion time in microseconds
    pub const fn conversion_time_us(&self) -> u32 {
        match self {
            Self::Bits9 => 93_750,
            Self::Bits10 => 187_500,
            Self::Bits11 => 375_000,
            Self::Bits12 => 750_000,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::Bits12
    }
}
