//! Startup bus survey and sensor discovery
//!
//! Discovery walks the bus enumeration once, in the bus's own deterministic
//! order, and binds the i-th device found to slot i of the sensor table.
//! A slot the bus cannot fill keeps its compiled-in address. Enumerated
//! addresses are taken as-is: they are never compared with the compiled-in
//! ones, and devices past the last slot are not enumerated at all.
//!
//! A failed console write never cuts either phase short. The bus work runs
//! to the end and the first write error comes back next to the result.

use crate::domain::{DeviceAddress, Resolution, SensorTable, SENSOR_COUNT};
use crate::ports::console::keep_first;
use crate::ports::{Console, ConsoleError, TemperatureBus};

/// What the startup survey learned about the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusSurvey {
    pub device_count: u8,
    pub parasite_power: bool,
    /// First failed write of the survey lines, if any
    pub console: Result<(), ConsoleError>,
}

/// Result of discovery for one table slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotOutcome {
    /// Enumeration returned `address` for this slot; `resolution` is what the
    /// device reported after being configured
    Bound {
        address: DeviceAddress,
        resolution: Option<Resolution>,
    },
    /// Enumeration ran out before this slot
    Missing,
}

impl SlotOutcome {
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }
}

/// Table produced by discovery together with the per-slot outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Discovery {
    pub table: SensorTable,
    pub outcomes: [SlotOutcome; SENSOR_COUNT],
    /// First failed write of the discovery lines, if any
    pub console: Result<(), ConsoleError>,
}

impl Discovery {
    pub fn bound_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_bound()).count()
    }
}

/// Print the startup banner, device count and power mode
pub async fn survey<B: TemperatureBus, C: Console>(bus: &mut B, console: &mut C) -> BusSurvey {
    let mut printed = console
        .println(format_args!("Dallas Temperature IC Control Library Demo"))
        .await;

    keep_first(&mut printed, console.print(format_args!("Locating devices...")).await);
    let device_count = bus.device_count().await;
    keep_first(
        &mut printed,
        console
            .println(format_args!("Found {} devices.", device_count))
            .await,
    );

    let parasite_power = bus.is_parasite_power_mode().await;
    keep_first(
        &mut printed,
        console
            .println(format_args!(
                "Parasite power is: {}",
                if parasite_power { "ON" } else { "OFF" }
            ))
            .await,
    );

    info!("bus survey: {} devices, parasite={}", device_count, parasite_power);
    BusSurvey {
        device_count,
        parasite_power,
        console: printed,
    }
}

/// Bind enumerated devices to the slots of `table`, in order.
///
/// Each found device is switched to `precision`. `table` itself is left
/// untouched; the returned [`Discovery`] carries the rebound copy.
pub async fn discover<B: TemperatureBus, C: Console>(
    bus: &mut B,
    console: &mut C,
    table: &SensorTable,
    precision: Resolution,
) -> Discovery {
    let mut discovered = *table;
    let mut outcomes = [SlotOutcome::Missing; SENSOR_COUNT];
    let mut printed = Ok(());

    bus.reset_search();
    for (index, outcome) in outcomes.iter_mut().enumerate() {
        let Some(address) = bus.search_next().await else {
            keep_first(
                &mut printed,
                console
                    .println(format_args!("Unable to find address for device {}", index))
                    .await,
            );
            continue;
        };

        discovered.bind(index, address);
        if let Err(e) = bus.set_resolution(&address, precision).await {
            warn!("slot {}: set resolution failed: {:?}", index, e);
        }

        let resolution = bus.resolution(&address).await;
        keep_first(
            &mut printed,
            console
                .println(format_args!(
                    "Device {} Resolution: {}",
                    index,
                    resolution.map_or(0, |r| r.bits())
                ))
                .await,
        );
        debug!("slot {} bound", index);

        *outcome = SlotOutcome::Bound {
            address,
            resolution,
        };
    }

    Discovery {
        table: discovered,
        outcomes,
        console: printed,
    }
}
