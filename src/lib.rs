//! DS18B20 Zone Temperature Monitor Library
//!
//! This library reads up to five DS18B20 sensors sharing one one-wire data
//! line and prints their temperatures as text over a serial link, using a
//! hexagonal layout so the whole flow runs against mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - SensorTable / SensorRecord / Zone                             │
//! │  - DeviceAddress, Resolution, disconnection sentinel             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Application Layer                            │
//! │  - survey + discover: bind enumerated devices to table slots     │
//! │  - Poller: convert, print, wait, forever                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - TemperatureBus: enumerate, convert, read, configure           │
//! │  - Console: text output                                          │
//! │  - DelayNs (embedded-hal-async): end-of-cycle pause              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (feature `rp2350`)                  │
//! │  - OneWireBus: DS18B20 over a GPIO                               │
//! │  - UsbCdcConsole: USB CDC serial                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Startup and polling
//!
//! ```ignore
//! survey(&mut bus, &mut console).await;
//! let table = SensorTable::INSTALLED;
//! let discovery = discover(&mut bus, &mut console, &table, Resolution::Bits9).await;
//! Poller::new(bus, console, Delay, &discovery.table, MonitorConfig::default()).run().await
//! ```

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - sensor table and value types
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Application layer - discovery and polling
pub mod app;

/// Adapters - RP2350 implementations
#[cfg(feature = "rp2350")]
pub mod adapters;

// Re-export key domain types
pub use domain::{DeviceAddress, Resolution, SensorRecord, SensorTable, Zone, SENSOR_COUNT};

// Re-export key port traits
pub use ports::{BusError, Console, ConsoleError, TemperatureBus};

// Re-export the application entry points
pub use app::{discover, survey, Discovery, MonitorConfig, Poller, SlotOutcome};

// Re-export adapters
#[cfg(feature = "rp2350")]
pub use adapters::{OneWireBus, UsbCdcConsole};
