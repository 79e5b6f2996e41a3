//! Zone Temperature Monitor firmware (RP2350)
//!
//! Five DS18B20 sensors share one one-wire data line on GPIO 2 (4.7k pull-up
//! to 3V3). Readings are printed once per second to the USB CDC serial port.
//!
//! ```bash
//! cargo run --release --features rp2350 --target thumbv8m.main-none-eabihf --bin zone_monitor
//! ```
//!
//! Open the port with any serial terminal; output starts once DTR is raised.

#![no_std]
#![no_main]
#![allow(static_mut_refs)]

use defmt::*;
use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config};
use {defmt_rtt as _, panic_probe as _};

use zone_thermo::adapters::{OneWireBus, UsbCdcConsole};
use zone_thermo::app::{discover, survey, MonitorConfig, Poller};
use zone_thermo::domain::SensorTable;

// ============================================================================
// Boot Image
// ============================================================================

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

#[link_section = ".bi_entries"]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 3] = [
    embassy_rp::binary_info::rp_program_name!(c"zone-monitor"),
    embassy_rp::binary_info::rp_program_description!(c"DS18B20 zone temperature monitor"),
    embassy_rp::binary_info::rp_cargo_version!(),
];

// ============================================================================
// Board Configuration
// ============================================================================

/// GPIO carrying the one-wire data line
const ONE_WIRE_GPIO: u8 = 2;

/// USB serial number reported to the host
const USB_SERIAL: &str = "ZONE0001";

// ============================================================================
// Interrupt Bindings
// ============================================================================

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<peripherals::USB>;
});

type UsbDriver = Driver<'static, peripherals::USB>;

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    info!("=== Zone Temperature Monitor ===");

    let p = embassy_rp::init(Default::default());

    // ========================================================================
    // Create Adapters
    // ========================================================================

    info!("One-wire bus on GPIO {}", ONE_WIRE_GPIO);
    let pin = OutputOpenDrain::new(p.PIN_2, Level::High);
    let mut bus = match OneWireBus::new(pin) {
        Ok(bus) => bus,
        Err(e) => {
            error!("One-wire bus unusable: {:?}", e);
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        }
    };

    info!("Setting up USB...");
    let mut console = UsbCdcConsole::new(setup_usb(&spawner, p.USB));
    info!("USB setup complete");

    // Serial output before a terminal attaches would be dropped
    console.wait_connection().await;
    info!("USB connected");

    // ========================================================================
    // Startup: survey, then discovery
    // ========================================================================

    let config = MonitorConfig::default();
    let table = startup(&mut bus, &mut console, &config).await;

    // ========================================================================
    // Polling
    // ========================================================================

    let mut poller = Poller::new(bus, console, Delay, &table, config);
    poller.run().await
}

/// Print the bus survey and bind enumerated sensors to the table
async fn startup(
    bus: &mut OneWireBus<'static>,
    console: &mut UsbCdcConsole<'static, UsbDriver>,
    config: &MonitorConfig,
) -> SensorTable {
    let found = survey(bus, console).await;
    if let Err(e) = found.console {
        warn!("Survey output incomplete: {:?}", e);
    }
    if usize::from(found.device_count) != zone_thermo::SENSOR_COUNT {
        warn!(
            "{} devices on the bus, table expects {}",
            found.device_count,
            zone_thermo::SENSOR_COUNT
        );
    }

    let discovery = discover(bus, console, &SensorTable::INSTALLED, config.precision).await;
    if let Err(e) = discovery.console {
        warn!("Discovery output incomplete: {:?}", e);
    }
    info!("{} of {} slots bound", discovery.bound_count(), zone_thermo::SENSOR_COUNT);

    discovery.table
}

// ============================================================================
// USB Setup
// ============================================================================

fn setup_usb(
    spawner: &embassy_executor::Spawner,
    usb: embassy_rp::Peri<'static, peripherals::USB>,
) -> CdcAcmClass<'static, UsbDriver> {
    let driver = Driver::new(usb, Irqs);

    let mut config = Config::new(0x2e8a, 0x000a);
    config.manufacturer = Some("Raspberry Pi");
    config.product = Some("Zone Temperature Monitor");
    config.serial_number = Some(USB_SERIAL);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static mut CONFIG_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut BOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut MSOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut CONTROL_BUF: [u8; 64] = [0; 64];
    static mut STATE: State = State::new();

    let mut builder = unsafe {
        Builder::new(
            driver,
            config,
            &mut CONFIG_DESCRIPTOR,
            &mut BOS_DESCRIPTOR,
            &mut MSOS_DESCRIPTOR,
            &mut CONTROL_BUF,
        )
    };

    let class = unsafe { CdcAcmClass::new(&mut builder, &mut STATE, 64) };
    let usb = builder.build();

    spawner.spawn(usb_device_task(usb).expect("usb device task"));

    class
}

// ============================================================================
// USB Device Task
// ============================================================================

#[embassy_executor::task]
async fn usb_device_task(mut usb: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    usb.run().await
}
