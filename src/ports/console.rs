//! Console port - abstraction for the human-readable serial output
//!
//! The application prints progress and readings as plain text lines.
//! This trait hides the transport (USB CDC, UART, a test buffer).

use core::fmt::{self, Write as _};
use core::future::Future;
use heapless::String;

/// Capacity of the buffer a single `print`/`println` call formats into
pub const LINE_CAPACITY: usize = 96;

/// Line terminator written by [`Console::newline`] and [`Console::println`]
pub const NEWLINE: &str = "\r\n";

/// Error type for console output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Formatted text did not fit in [`LINE_CAPACITY`] bytes
    Overflow,
    /// Host went away mid-write
    Disconnected,
    /// Transport refused the data
    SendFailed,
}

/// Port for text output
///
/// Only [`write_str`](Self::write_str) is required; the formatting helpers
/// render into a stack buffer first and hand the text over in one write.
///
/// # Example Implementation
///
/// ```ignore
/// struct UartConsole<'d> {
///     uart: BufferedUartTx<'d>,
/// }
///
/// impl Console for UartConsole<'_> {
///     async fn write_str(&mut self, s: &str) -> Result<(), ConsoleError> {
///         self.uart.write_all(s.as_bytes()).await.map_err(|_| ConsoleError::SendFailed)
///     }
/// }
/// ```
pub trait Console {
    /// Write `s` verbatim
    fn write_str(&mut self, s: &str) -> impl Future<Output = Result<(), ConsoleError>>;

    /// Write formatted text without a line break
    fn print(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<(), ConsoleError>> {
        let rendered = render(args, false);
        async move { self.write_str(&rendered?).await }
    }

    /// Write formatted text followed by a line break
    fn println(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<(), ConsoleError>> {
        let rendered = render(args, true);
        async move { self.write_str(&rendered?).await }
    }

    /// Write a bare line break
    fn newline(&mut self) -> impl Future<Output = Result<(), ConsoleError>> {
        self.write_str(NEWLINE)
    }
}

/// Fold `result` into `printed`, keeping the earliest failure.
///
/// Output is a side effect only: callers carry on with bus work after a
/// failed write and report the first error at the end.
pub(crate) fn keep_first(printed: &mut Result<(), ConsoleError>, result: Result<(), ConsoleError>) {
    if printed.is_ok() {
        *printed = result;
    }
}

fn render(args: fmt::Arguments<'_>, newline: bool) -> Result<String<LINE_CAPACITY>, ConsoleError> {
    let mut line = String::new();
    line.write_fmt(args).map_err(|_| ConsoleError::Overflow)?;
    if newline {
        line.push_str(NEWLINE).map_err(|_| ConsoleError::Overflow)?;
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockConsole;
    use embassy_futures::block_on;

    #[test]
    fn test_print_and_println() {
        let mut console = MockConsole::default();
        block_on(async {
            console.print(format_args!("Device {} ", 3)).await.unwrap();
            console.println(format_args!("{:.2}", 21.5f32)).await.unwrap();
            console.newline().await.unwrap();
        });
        assert_eq!(console.output, "Device 3 21.50\r\n\r\n");
    }

    #[test]
    fn test_overlong_line_is_rejected_without_partial_output() {
        let mut console = MockConsole::default();
        let long = [b'x'; LINE_CAPACITY + 1];
        let long = core::str::from_utf8(&long).unwrap();

        let result = block_on(console.print(format_args!("{}", long)));
        assert_eq!(result, Err(ConsoleError::Overflow));
        assert!(console.output.is_empty());
    }

    #[test]
    fn test_keep_first_holds_earliest_failure() {
        let mut printed = Ok(());
        keep_first(&mut printed, Ok(()));
        keep_first(&mut printed, Err(ConsoleError::Overflow));
        keep_first(&mut printed, Err(ConsoleError::Disconnected));
        keep_first(&mut printed, Ok(()));
        assert_eq!(printed, Err(ConsoleError::Overflow));
    }
}
