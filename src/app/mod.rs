//! Application layer - startup discovery and the polling loop
//!
//! Everything here is generic over the ports, so the same code runs on the
//! board and against the mocks in the unit tests.

pub mod config;
pub mod discovery;
pub mod poller;
pub mod report;

pub use config::{MonitorConfig, POLL_INTERVAL_MS, TEMPERATURE_PRECISION};
pub use discovery::{discover, survey, BusSurvey, Discovery, SlotOutcome};
pub use poller::Poller;
pub use report::{print_address, print_data, print_resolution, print_temperature};
