//! Monitor unsolicited module events.
//!
//! Prints everything that arrives on the event channel: received
//! packets, modem status changes, transmit statuses, and frames the
//! driver does not recognise. Useful for watching a sensor network
//! come up, or for debugging framing problems.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p beeline --example monitor_events
//! ```

use beeline::{Event, SerialTransport, XBee};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port = "/dev/ttyUSB0";
    println!("Connecting to XBee on {port}...");

    let transport = SerialTransport::open(port, 9600).await?;
    let (xbee, mut events) = XBee::open(Box::new(transport));

    let serial = xbee.serial_number().await?;
    println!("Connected to module {serial:#018X}. Waiting for events...\n");

    while let Some(event) = events.recv().await {
        match event {
            Event::ReceivePacket(packet) => {
                println!(
                    "RX from {:#018X} ({:#06X}) [{}]: {:02X?}",
                    packet.source_address,
                    packet.source_network_address,
                    packet.options,
                    packet.data.as_ref()
                );
            }
            Event::ModemStatus(status) => {
                println!("Modem status: {status}");
            }
            Event::TransmitStatus(status) => {
                println!(
                    "TX status (frame {}): {} after {} retries, {}",
                    status.frame_id,
                    status.delivery_status,
                    status.retry_count,
                    status.discovery_status
                );
            }
            Event::AtResponse(response) => {
                println!(
                    "Stray AT response: {} {} {:02X?}",
                    response.command,
                    response.status,
                    response.data.as_ref()
                );
            }
            Event::UnknownFrame(unknown) => {
                println!(
                    "Unknown frame kind {:#04X}: {:02X?}",
                    unknown.kind,
                    unknown.payload.as_ref()
                );
            }
        }
    }

    println!("Event channel closed.");
    Ok(())
}
