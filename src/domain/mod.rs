//! Domain layer - sensor table and bus-independent value types
//!
//! Nothing in here knows how the bus or the serial link are driven.

pub mod address;
pub mod reading;
pub mod resolution;
pub mod zone;

pub use address::{DeviceAddress, DS18B20_FAMILY_CODE};
pub use reading::{is_disconnected, DEVICE_DISCONNECTED_C};
pub use resolution::Resolution;
pub use zone::{SensorRecord, SensorTable, Zone, SENSOR_COUNT};
