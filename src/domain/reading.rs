//! Temperature readings as the bus driver reports them

/// Value the bus reports in place of a temperature when a device does not
/// answer or its scratchpad fails the CRC check.
pub const DEVICE_DISCONNECTED_C: f32 = -127.0;

/// Whether `temperature_c` is the disconnection sentinel rather than a
/// measurement
#[inline]
pub fn is_disconnected(temperature_c: f32) -> bool {
    temperature_c == DEVICE_DISCONNECTED_C
}
