//! Discover the modules on the PAN.
//!
//! Issues a node discovery and prints a table of every module that
//! responds within the network's discovery window.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p beeline --example discover_nodes
//! ```

use std::time::Duration;

use beeline::{SerialTransport, XBee};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = "/dev/ttyUSB0";
    println!("Connecting to XBee on {port}...");

    let transport = SerialTransport::open(port, 9600).await?;
    let (xbee, _events) = XBee::open(Box::new(transport));

    // The network's own discovery window, padded so stragglers near
    // the deadline still make it in.
    let window = xbee.node_discovery_timeout().await? + Duration::from_secs(1);
    println!("Discovering nodes for {window:?}...\n");

    let (nodes, err) = xbee.node_discover(window).await;

    println!(
        "{:<20} {:<18} {:>6} {:<12}",
        "Node ID", "Serial", "Net", "Type"
    );
    println!("{:-<20} {:-<18} {:-<6} {:-<12}", "", "", "", "");
    for node in &nodes {
        println!(
            "{:<20} {:#018X} {:#06X} {:<12}",
            node.node_id,
            node.serial_number,
            node.network_address,
            node.device_type.to_string()
        );
    }
    println!("\n{} node(s) found.", nodes.len());

    if let Some(err) = err {
        println!("Discovery ended early: {err}");
    }

    xbee.close().await;
    Ok(())
}
