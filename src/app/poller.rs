//! Periodic polling loop
//!
//! Each cycle converts every sensor at once, prints one reading per table
//! slot on a single line and then waits out the poll interval.

use crate::app::config::MonitorConfig;
use crate::app::report::print_temperature;
use crate::domain::SensorTable;
use crate::ports::console::keep_first;
use crate::ports::{Console, ConsoleError, TemperatureBus};
use embedded_hal_async::delay::DelayNs;

/// Drives the polling phase over a discovered sensor table
pub struct Poller<'t, B, C, D> {
    bus: B,
    console: C,
    delay: D,
    table: &'t SensorTable,
    config: MonitorConfig,
    cycles: u32,
}

impl<'t, B, C, D> Poller<'t, B, C, D>
where
    B: TemperatureBus,
    C: Console,
    D: DelayNs,
{
    pub fn new(
        bus: B,
        console: C,
        delay: D,
        table: &'t SensorTable,
        config: MonitorConfig,
    ) -> Self {
        Self {
            bus,
            console,
            delay,
            table,
            config,
            cycles: 0,
        }
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Run one cycle: convert, print every slot, wait.
    ///
    /// A failed write never skips bus work or the wait; the first print error
    /// is returned once the cycle is over.
    pub async fn cycle(&mut self) -> Result<(), ConsoleError> {
        let printed = self.report().await;
        self.delay.delay_ms(self.config.poll_interval_ms).await;
        self.cycles = self.cycles.wrapping_add(1);
        printed
    }

    /// Poll forever
    pub async fn run(&mut self) -> ! {
        info!("polling every {} ms", self.config.poll_interval_ms);
        loop {
            if let Err(e) = self.cycle().await {
                warn!("cycle {}: console write failed: {:?}", self.cycles, e);
            }
        }
    }

    async fn report(&mut self) -> Result<(), ConsoleError> {
        let mut printed = self
            .console
            .println(format_args!("Requesting temperatures..."))
            .await;
        self.bus.request_temperatures().await;
        keep_first(&mut printed, self.console.println(format_args!("DONE")).await);

        let table = self.table;
        for record in table.iter() {
            if self.config.report_disconnected {
                let checked =
                    print_temperature(&mut self.bus, &mut self.console, &record.address).await;
                keep_first(&mut printed, checked.map(drop));
                continue;
            }
            // Raw value, sentinel included
            let temperature_c = self.bus.temperature_c(&record.address).await;
            keep_first(
                &mut printed,
                self.console
                    .print(format_args!("{:.2}*C ", temperature_c))
                    .await,
            );
        }

        keep_first(&mut printed, self.console.newline().await);
        printed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceAddress, Resolution};
    use crate::ports::mock::{sim_address, BusCall, MockBus, MockConsole, MockDelay};
    use embassy_futures::block_on;

    fn discovered_table() -> SensorTable {
        let mut table = SensorTable::INSTALLED;
        for i in 0..5 {
            table.bind(i, sim_address(i as u8));
        }
        table
    }

    fn populated_bus() -> MockBus {
        let mut bus = MockBus::with_devices(5);
        for (i, t) in [20.0, 20.5, 21.0, 21.5, 22.0].into_iter().enumerate() {
            bus.set_temperature(sim_address(i as u8), t);
        }
        bus
    }

    #[test]
    fn test_cycle_prints_in_order_then_waits() {
        let table = discovered_table();
        let mut poller = Poller::new(
            populated_bus(),
            MockConsole::default(),
            MockDelay::default(),
            &table,
            MonitorConfig::default(),
        );

        block_on(poller.cycle()).unwrap();

        assert_eq!(
            poller.console().output,
            "Requesting temperatures...\r\n\
             DONE\r\n\
             20.00*C 20.50*C 21.00*C 21.50*C 22.00*C \r\n"
        );
        assert_eq!(poller.delay().waits_ms, [1000]);
        assert_eq!(poller.cycles(), 1);
    }

    #[test]
    fn test_bounded_cycles_each_convert_once() {
        let table = discovered_table();
        let mut poller = Poller::new(
            populated_bus(),
            MockConsole::default(),
            MockDelay::default(),
            &table,
            MonitorConfig::default(),
        );

        block_on(async {
            for _ in 0..3 {
                poller.cycle().await.unwrap();
            }
        });

        assert_eq!(
            poller
                .bus()
                .count_calls(|c| matches!(c, BusCall::RequestTemperatures)),
            3
        );
        assert_eq!(poller.delay().waits_ms, [1000, 1000, 1000]);
        assert_eq!(poller.console().output.matches("DONE\r\n").count(), 3);
    }

    #[test]
    fn test_readings_follow_table_order() {
        let table = discovered_table();
        let mut poller = Poller::new(
            populated_bus(),
            MockConsole::default(),
            MockDelay::default(),
            &table,
            MonitorConfig::default(),
        );

        block_on(poller.cycle()).unwrap();

        let read: Vec<DeviceAddress> = poller
            .bus()
            .calls
            .iter()
            .filter_map(|c| match c {
                BusCall::Temperature(a) => Some(*a),
                _ => None,
            })
            .collect();
        let expected: Vec<DeviceAddress> = table.iter().map(|r| r.address).collect();
        assert_eq!(read, expected);
        assert_eq!(poller.bus().calls[0], BusCall::RequestTemperatures);
    }

    #[test]
    fn test_disconnected_sensor_prints_raw_sentinel() {
        let table = discovered_table();
        let mut bus = populated_bus();
        bus.devices.retain(|a| *a != sim_address(2));
        let mut poller = Poller::new(
            bus,
            MockConsole::default(),
            MockDelay::default(),
            &table,
            MonitorConfig::default(),
        );

        block_on(poller.cycle()).unwrap();

        let lines = poller.console().lines();
        assert_eq!(lines[2], "20.00*C 20.50*C -127.00*C 21.50*C 22.00*C ");
        assert!(!poller.console().output.contains("Error"));
    }

    #[test]
    fn test_disconnection_reporting_uses_checked_helper() {
        let table = discovered_table();
        let mut bus = populated_bus();
        bus.devices.retain(|a| *a != sim_address(2));
        let mut poller = Poller::new(
            bus,
            MockConsole::default(),
            MockDelay::default(),
            &table,
            MonitorConfig::default().reporting_disconnected(),
        );

        block_on(poller.cycle()).unwrap();

        assert_eq!(
            poller.console().output,
            "Requesting temperatures...\r\n\
             DONE\r\n\
             20.00[C] 20.50[C] Error: Could not read temperature data\r\n\
             21.50[C] 22.00[C] \r\n"
        );
    }

    #[test]
    fn test_console_failure_still_waits() {
        let table = discovered_table();
        let mut poller = Poller::new(
            populated_bus(),
            MockConsole::failing_after(1),
            MockDelay::default(),
            &table,
            MonitorConfig {
                poll_interval_ms: 250,
                ..MonitorConfig::default()
            },
        );

        let result = block_on(poller.cycle());

        assert_eq!(result, Err(ConsoleError::Disconnected));
        assert_eq!(poller.delay().waits_ms, [250]);
        assert_eq!(poller.console().output, "Requesting temperatures...\r\n");
    }

    #[test]
    fn test_console_failure_still_converts_and_reads() {
        let table = discovered_table();
        let mut poller = Poller::new(
            populated_bus(),
            MockConsole::failing_after(0),
            MockDelay::default(),
            &table,
            MonitorConfig::default(),
        );

        let result = block_on(poller.cycle());

        assert_eq!(result, Err(ConsoleError::Disconnected));
        let bus = poller.bus();
        assert_eq!(bus.calls[0], BusCall::RequestTemperatures);
        assert_eq!(bus.count_calls(|c| matches!(c, BusCall::Temperature(_))), 5);
        assert_eq!(poller.delay().waits_ms, [1000]);
        assert_eq!(poller.cycles(), 1);
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = MonitorConfig::default();
        assert_eq!(config.precision, Resolution::Bits9);
        assert_eq!(config.poll_interval_ms, 1000);
        assert!(!config.report_disconnected);
    }
}
