//! Parameter encoders and response parsers for the typed façade.
//!
//! Everything here is pure: bytes in, values out. The driver methods in
//! [`crate::XBee`] pair these with the request plumbing. Multi-byte
//! integers are big-endian throughout, matching the wire format.

use std::time::Duration;

use beeline_core::error::{Error, Result};
use beeline_core::types::{ActiveScanDevice, DeviceType, Node};

use crate::at::STANDARD_DATA_RATES;

/// Minimum size of a node discovery record (all fixed fields plus an
/// empty, NUL-terminated node identifier).
pub const NODE_RECORD_MIN: usize = 18;

/// Fixed size of an active scan record.
pub const SCAN_RECORD_MIN: usize = 16;

/// Decode a big-endian unsigned integer of up to 8 bytes.
///
/// Registers report values in their natural width (1, 2, 4, or 8
/// bytes); an empty slice decodes to 0.
pub fn decode_uint(b: &[u8]) -> u64 {
    b.iter().fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Encode the BD parameter for a requested baud rate.
///
/// A rate matching one of the standard rates is sent as its table
/// index; anything else is sent literally. Always four bytes.
pub fn encode_data_rate(baud: u32) -> [u8; 4] {
    let value = STANDARD_DATA_RATES
        .iter()
        .position(|&rate| rate == baud)
        .map(|ix| ix as u32)
        .unwrap_or(baud);
    value.to_be_bytes()
}

/// Decode a BD register value into a baud rate.
///
/// Values 0-7 select a standard rate; anything larger already is one.
pub fn decode_data_rate(b: &[u8]) -> u32 {
    let value = decode_uint(b);
    match usize::try_from(value) {
        Ok(ix) if ix < STANDARD_DATA_RATES.len() => STANDARD_DATA_RATES[ix],
        _ => value as u32,
    }
}

/// Decode the NT register (units of 100 ms) into a duration.
pub fn decode_discovery_timeout(b: &[u8]) -> Duration {
    Duration::from_millis(decode_uint(b) * 100)
}

/// Encode a duration into the NT register's 100 ms units.
///
/// Fails if the duration does not fit the register's single byte.
pub fn encode_discovery_timeout(timeout: Duration) -> Result<u8> {
    let units = timeout.as_millis() / 100;
    u8::try_from(units).map_err(|_| Error::TooLarge {
        what: "discovery timeout (100 ms units)",
        len: units as usize,
        max: u8::MAX as usize,
    })
}

/// Parse one node discovery record from the data of an ND response.
///
/// Layout: 16-bit network address, 64-bit serial number,
/// NUL-terminated node identifier, 16-bit parent network address,
/// device type, reserved status byte, 16-bit profile id, 16-bit
/// manufacturer id.
pub fn parse_node_record(data: &[u8]) -> Result<Node> {
    if data.len() < NODE_RECORD_MIN {
        return Err(Error::ShortRecord {
            what: "node discovery",
            len: data.len(),
            min: NODE_RECORD_MIN,
        });
    }
    let network_address = u16::from_be_bytes([data[0], data[1]]);
    let serial_number = decode_uint(&data[2..10]);
    let rest = &data[10..];
    let nul = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::MissingTerminator)?;
    let node_id = String::from_utf8_lossy(&rest[..nul]).into_owned();
    let rest = &rest[nul + 1..];
    if rest.len() < 8 {
        // Fixed tail: parent (2) + type (1) + status (1) + profile (2) +
        // manufacturer (2), after the identifier and its terminator.
        return Err(Error::ShortRecord {
            what: "node discovery",
            len: data.len(),
            min: 10 + nul + 1 + 8,
        });
    }
    Ok(Node {
        network_address,
        serial_number,
        node_id,
        parent_network_address: u16::from_be_bytes([rest[0], rest[1]]),
        device_type: DeviceType::from(rest[2]),
        status: rest[3],
        profile_id: u16::from_be_bytes([rest[4], rest[5]]),
        manufacturer_id: u16::from_be_bytes([rest[6], rest[7]]),
    })
}

/// Parse one beacon record from the data of an AS response.
pub fn parse_scan_record(data: &[u8]) -> Result<ActiveScanDevice> {
    if data.len() < SCAN_RECORD_MIN {
        return Err(Error::ShortRecord {
            what: "active scan",
            len: data.len(),
            min: SCAN_RECORD_MIN,
        });
    }
    Ok(ActiveScanDevice {
        scan_type: data[0],
        channel: data[1],
        pan_id: u16::from_be_bytes([data[2], data[3]]),
        extended_pan_id: decode_uint(&data[4..12]),
        allow_join: data[12] != 0,
        stack_profile: data[13],
        lqi: data[14],
        rssi: data[15] as i8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_uint_widths() {
        assert_eq!(decode_uint(&[]), 0);
        assert_eq!(decode_uint(&[0x2A]), 0x2A);
        assert_eq!(decode_uint(&[0x12, 0x34]), 0x1234);
        assert_eq!(decode_uint(&[0x00, 0x13, 0xA2, 0x00]), 0x0013_A200);
        assert_eq!(
            decode_uint(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn encode_data_rate_standard_uses_index() {
        assert_eq!(encode_data_rate(9_600), [0x00, 0x00, 0x00, 0x03]);
        assert_eq!(encode_data_rate(1_200), [0x00, 0x00, 0x00, 0x00]);
        assert_eq!(encode_data_rate(115_200), [0x00, 0x00, 0x00, 0x07]);
    }

    #[test]
    fn encode_data_rate_nonstandard_is_literal() {
        assert_eq!(encode_data_rate(230_400), [0x00, 0x03, 0x84, 0x00]);
        assert_eq!(encode_data_rate(921_600), [0x00, 0x0E, 0x10, 0x00]);
    }

    #[test]
    fn decode_data_rate_index_and_literal() {
        assert_eq!(decode_data_rate(&[0x03]), 9_600);
        assert_eq!(decode_data_rate(&[0x00, 0x00, 0x00, 0x07]), 115_200);
        // A value above 7 is already a baud rate, whatever its width.
        assert_eq!(decode_data_rate(&[0x03, 0x84]), 900);
        assert_eq!(decode_data_rate(&[0x00, 0x00, 0x03, 0x84]), 900);
        assert_eq!(decode_data_rate(&[0x00, 0x03, 0x84, 0x00]), 230_400);
    }

    #[test]
    fn discovery_timeout_units() {
        assert_eq!(
            decode_discovery_timeout(&[0x3C]),
            Duration::from_secs(6)
        );
        assert_eq!(encode_discovery_timeout(Duration::from_secs(6)).unwrap(), 0x3C);
        assert_eq!(
            encode_discovery_timeout(Duration::from_millis(250)).unwrap(),
            2
        );
        assert!(matches!(
            encode_discovery_timeout(Duration::from_secs(60)),
            Err(Error::TooLarge { .. })
        ));
    }

    /// Builds a well-formed ND record for the given identifier.
    fn node_record(node_id: &[u8]) -> Vec<u8> {
        let mut rec = vec![0x12, 0x34]; // network address
        rec.extend_from_slice(&[0x00, 0x13, 0xA2, 0x00, 0x40, 0x52, 0x13, 0x37]); // serial
        rec.extend_from_slice(node_id);
        rec.push(0x00); // NI terminator
        rec.extend_from_slice(&[0xFF, 0xFE]); // parent
        rec.push(0x01); // device type: router
        rec.push(0x00); // status (reserved)
        rec.extend_from_slice(&[0xC1, 0x05]); // profile id
        rec.extend_from_slice(&[0x10, 0x1E]); // manufacturer id
        rec
    }

    #[test]
    fn parse_node_record_full() {
        let rec = node_record(b"PUMP-7");
        let node = parse_node_record(&rec).unwrap();
        assert_eq!(node.network_address, 0x1234);
        assert_eq!(node.serial_number, 0x0013_A200_4052_1337);
        assert_eq!(node.node_id, "PUMP-7");
        assert_eq!(node.parent_network_address, 0xFFFE);
        assert_eq!(node.device_type, DeviceType::Router);
        assert_eq!(node.status, 0x00);
        assert_eq!(node.profile_id, 0xC105);
        assert_eq!(node.manufacturer_id, 0x101E);
    }

    #[test]
    fn parse_node_record_empty_identifier() {
        let rec = node_record(b"");
        let node = parse_node_record(&rec).unwrap();
        assert_eq!(node.node_id, "");
    }

    #[test]
    fn parse_node_record_too_short() {
        let err = parse_node_record(&[0u8; 17]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRecord {
                what: "node discovery",
                len: 17,
                ..
            }
        ));
    }

    #[test]
    fn parse_node_record_missing_terminator() {
        let mut rec = node_record(b"X");
        // Strip everything from the terminator on.
        rec.truncate(10);
        rec.extend_from_slice(&[b'A'; 10]);
        assert!(matches!(
            parse_node_record(&rec),
            Err(Error::MissingTerminator)
        ));
    }

    #[test]
    fn parse_node_record_truncated_after_identifier() {
        let mut rec = node_record(b"LONG-NAME");
        rec.truncate(rec.len() - 3);
        assert!(matches!(
            parse_node_record(&rec),
            Err(Error::ShortRecord { .. })
        ));
    }

    #[test]
    fn parse_scan_record_full() {
        let rec = [
            0x02, // type: ZB
            0x0E, // channel 14
            0x33, 0x32, // PAN
            0x00, 0x13, 0xA2, 0x00, 0x40, 0x0A, 0x3E, 0x02, // extended PAN
            0x01, // allow join
            0x02, // stack profile
            0x84, // LQI
            0xD2, // RSSI (-46)
        ];
        let dev = parse_scan_record(&rec).unwrap();
        assert_eq!(dev.scan_type, 2);
        assert_eq!(dev.channel, 14);
        assert_eq!(dev.pan_id, 0x3332);
        assert_eq!(dev.extended_pan_id, 0x0013_A200_400A_3E02);
        assert!(dev.allow_join);
        assert_eq!(dev.stack_profile, 2);
        assert_eq!(dev.lqi, 0x84);
        assert_eq!(dev.rssi, -46);
    }

    #[test]
    fn parse_scan_record_too_short() {
        assert!(matches!(
            parse_scan_record(&[0u8; 15]),
            Err(Error::ShortRecord {
                what: "active scan",
                ..
            })
        ));
    }
}
