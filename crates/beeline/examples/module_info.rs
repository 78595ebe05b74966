//! Read and print a module's identity and radio configuration.
//!
//! Demonstrates the basic request/response path: open a serial port,
//! wrap it in a driver, and issue typed AT commands.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p beeline --example module_info
//! ```

use beeline::{SerialTransport, XBee};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port = "/dev/ttyUSB0";
    println!("Connecting to XBee on {port}...");

    let transport = SerialTransport::open(port, 9600).await?;
    let (xbee, _events) = XBee::open(Box::new(transport));

    let serial = xbee.serial_number().await?;
    let firmware = xbee.firmware_version().await?;
    let hardware = xbee.hardware_version().await?;
    let node_id = xbee.node_identifier().await?;
    let baud = xbee.interface_data_rate().await?;
    let escaped = xbee.api_enabled().await?;

    println!("Serial number:    {serial:#018X}");
    println!("Firmware version: {firmware:#06X}");
    println!("Hardware version: {hardware:#06X}");
    println!("Node identifier:  {node_id:?}");
    println!("Interface rate:   {baud} baud");
    if escaped {
        println!("Warning: module is in escaped API mode (AP=2), which");
        println!("this driver does not speak. Set AP=1.");
    }

    let pan = xbee.operating_extended_pan_id().await?;
    let assoc = xbee.association_indication().await?;
    println!("Operating PAN:    {pan:#018X}");
    println!(
        "Association:      {assoc:#04X}{}",
        if assoc == 0 { " (joined)" } else { "" }
    );

    xbee.close().await;
    Ok(())
}
