//! Compile-time monitor configuration

use crate::domain::Resolution;

/// Resolution every discovered sensor is switched to
pub const TEMPERATURE_PRECISION: Resolution = Resolution::Bits9;

/// Pause between polling cycles (milliseconds)
pub const POLL_INTERVAL_MS: u32 = 1000;

/// Configuration for discovery and polling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Resolution applied to each discovered sensor
    pub precision: Resolution,
    /// Pause after each polling cycle (milliseconds)
    pub poll_interval_ms: u32,
    /// Print an error line instead of the raw value when a sensor reads as
    /// disconnected. Off by default: the polling line then shows `-127.00*C`.
    pub report_disconnected: bool,
}

impl MonitorConfig {
    pub const fn new() -> Self {
        Self {
            precision: TEMPERATURE_PRECISION,
            poll_interval_ms: POLL_INTERVAL_MS,
            report_disconnected: false,
        }
    }

    /// Same configuration with disconnection reporting switched on
    pub const fn reporting_disconnected(self) -> Self {
        Self {
            report_disconnected: true,
            ..self
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}
