//! Serial port transport for XBee modules.
//!
//! [`SerialTransport`] implements the [`Transport`] trait for the UART
//! connection to an XBee ZB module, whether through a USB adapter
//! board presenting a virtual COM port or a directly-wired UART.
//!
//! The module's UART format is fixed at 8 data bits, no parity, one
//! stop bit; only the rate varies (the `BD` register, factory default
//! 9600). Hardware flow control (RTS/CTS) is worth enabling at high
//! rates, since the module's serial buffer is small.
//!
//! # Example
//!
//! ```no_run
//! use beeline_transport::SerialTransport;
//! use beeline_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> beeline_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", 9600).await?;
//!
//! // Query AP with frame id 1
//! transport.send(&[0x7E, 0x00, 0x04, 0x08, 0x01, 0x41, 0x50, 0x65]).await?;
//!
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, error, info, trace};

use beeline_core::error::{Error, Result};
use beeline_core::transport::Transport;

/// Serial port configuration.
///
/// The module's framing is fixed at 8-N-1, so only the rate and flow
/// control are configurable. Defaults match a factory-fresh module.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate; must match the module's `BD` register.
    pub baud_rate: u32,
    /// Enable RTS/CTS hardware flow control (wired to the module's
    /// D6/D7 pins when configured).
    pub hardware_flow_control: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            hardware_flow_control: false,
        }
    }
}

/// Serial port transport to an XBee module.
pub struct SerialTransport {
    /// The underlying serial port stream; `None` once closed.
    port: Option<SerialStream>,
    /// Port name for logging.
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port to the module.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. `/dev/ttyUSB0` on Linux,
    ///   `COM3` on Windows)
    /// * `baud_rate` - Must match the module's configured rate
    ///   (factory default 9600)
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::open_with_config(port, config).await
    }

    /// Open a serial port with explicit configuration.
    pub async fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        let flow_control = if config.hardware_flow_control {
            tokio_serial::FlowControl::Hardware
        } else {
            tokio_serial::FlowControl::None
        };
        debug!(
            port = %port,
            baud_rate = config.baud_rate,
            flow_control = ?flow_control,
            "opening serial port"
        );

        let stream = tokio_serial::new(port, config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(flow_control)
            .open_native_async()
            .map_err(|e| {
                error!(port = %port, error = %e, "failed to open serial port");
                Error::Transport(format!("failed to open serial port {port}: {e}"))
            })?;

        info!(port = %port, baud_rate = config.baud_rate, "serial port opened");

        Ok(Self {
            port: Some(stream),
            port_name: port.to_string(),
        })
    }

    /// The path this transport was opened on.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

}

/// Map broken-pipe style failures to a connection-lost error so the
/// reader task can tell an unplugged adapter from a bad write.
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::NotConnected => {
            Error::ConnectionLost
        }
        _ => Error::Io(e),
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        trace!(port = %self.port_name, bytes = data.len(), "sending data");
        let result = async {
            port.write_all(data).await?;
            // Flush so the frame leaves the host immediately.
            port.flush().await
        }
        .await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(port = %self.port_name, error = %e, "failed to send data");
                Err(map_io_error(e))
            }
        }
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        let result = tokio::time::timeout(timeout, port.read(buf)).await;
        match result {
            Ok(Ok(n)) => {
                trace!(port = %self.port_name, bytes = n, "received data");
                Ok(n)
            }
            Ok(Err(e)) => {
                error!(port = %self.port_name, error = %e, "failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => Err(Error::Timeout),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            debug!(port = %self.port_name, "closing serial port");
            // Flush whatever is still queued; dropping the stream
            // closes the port.
            let _ = port.flush().await;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_factory_module() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert!(!config.hardware_flow_control);
    }

    #[test]
    fn map_io_error_distinguishes_connection_loss() {
        let lost = map_io_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(matches!(lost, Error::ConnectionLost));

        let other = map_io_error(std::io::Error::new(std::io::ErrorKind::InvalidData, "noise"));
        assert!(matches!(other, Error::Io(_)));
    }
}
