//! Transmit a payload and wait for its delivery status.
//!
//! Shows the fire-and-forget transmit contract: the call returns a
//! frame id immediately, and the delivery result arrives later on the
//! event channel.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p beeline --example send_data -- "hello from beeline"
//! ```

use std::time::Duration;

use beeline::{
    Event, SerialTransport, TransmitOptions, XBee, ADDR_COORDINATOR, NET_ADDR_UNKNOWN,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let message = std::env::args().nth(1).unwrap_or_else(|| "ping".into());

    let port = "/dev/ttyUSB0";
    println!("Connecting to XBee on {port}...");

    let transport = SerialTransport::open(port, 9600).await?;
    let (xbee, mut events) = XBee::open(Box::new(transport));

    let frame_id = xbee
        .transmit(
            ADDR_COORDINATOR,
            NET_ADDR_UNKNOWN,
            0,
            TransmitOptions::default(),
            message.as_bytes(),
        )
        .await?;
    println!("Sent {} bytes to the coordinator as frame {frame_id}.", message.len());

    // Correlate the asynchronous status report by frame id.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            println!("No transmit status within 5s.");
            break;
        }
        match tokio::time::timeout(remaining, events.recv()).await {
            Ok(Some(Event::TransmitStatus(status))) if status.frame_id == frame_id => {
                println!(
                    "Delivery: {} (retries: {}, discovery: {})",
                    status.delivery_status, status.retry_count, status.discovery_status
                );
                break;
            }
            Ok(Some(other)) => println!("(other event: {other:?})"),
            Ok(None) => {
                println!("Event channel closed.");
                break;
            }
            Err(_) => {
                println!("No transmit status within 5s.");
                break;
            }
        }
    }

    xbee.close().await;
    Ok(())
}
