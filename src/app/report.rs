//! Diagnostic print helpers
//!
//! Stateless formatters for addresses, single readings and resolutions.
//! The polling loop prints raw values itself and only reaches for
//! [`print_temperature`] when disconnection reporting is switched on.

use crate::domain::{is_disconnected, DeviceAddress};
use crate::ports::{Console, ConsoleError, TemperatureBus};

/// Print `address` as 16 zero-padded upper-case hex digits
pub async fn print_address<C: Console>(
    console: &mut C,
    address: &DeviceAddress,
) -> Result<(), ConsoleError> {
    console.print(format_args!("{}", address)).await
}

/// Read and print one temperature as `21.50[C] `.
///
/// A disconnected sensor prints an error line instead. The reading is
/// returned either way.
pub async fn print_temperature<B: TemperatureBus, C: Console>(
    bus: &mut B,
    console: &mut C,
    address: &DeviceAddress,
) -> Result<f32, ConsoleError> {
    let temperature_c = bus.temperature_c(address).await;
    if is_disconnected(temperature_c) {
        console
            .println(format_args!("Error: Could not read temperature data"))
            .await?;
        return Ok(temperature_c);
    }

    console.print(format_args!("{:.2}[C] ", temperature_c)).await?;
    Ok(temperature_c)
}

/// Print the resolution a device reports, 0 if it cannot be read
pub async fn print_resolution<B: TemperatureBus, C: Console>(
    bus: &mut B,
    console: &mut C,
    address: &DeviceAddress,
) -> Result<(), ConsoleError> {
    let bits = bus.resolution(address).await.map_or(0, |r| r.bits());
    console.println(format_args!("Resolution: {}", bits)).await
}

/// Print address and temperature of one device on a line
pub async fn print_data<B: TemperatureBus, C: Console>(
    bus: &mut B,
    console: &mut C,
    address: &DeviceAddress,
) -> Result<(), ConsoleError> {
    console.print(format_args!("Device Address: ")).await?;
    print_address(console, address).await?;
    console.write_str(" ").await?;
    print_temperature(bus, console, address).await?;
    console.newline().await
}
