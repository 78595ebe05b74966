//! Classification of decoded frames into driver events.
//!
//! The reader hands each [`RawFrame`] here; classification yields the
//! frame id to route by (when the kind carries one) and the typed
//! [`Event`]. Payload slices move into the event without copying.

use beeline_core::events::{AtResponse, Event, ReceivePacket, TransmitStatus, UnknownFrame};
use beeline_core::types::{
    AtCommand, CommandStatus, DeliveryStatus, DiscoveryStatus, ModemStatus, ReceiveOptions,
};

use crate::commands::decode_uint;
use crate::frame::{kind, RawFrame};

/// Classify a frame into its routing id and event.
///
/// A recognised kind whose payload is shorter than its fixed layout is
/// demoted to [`Event::UnknownFrame`] so the raw bytes stay observable
/// instead of being mis-sliced.
pub(crate) fn classify(frame: RawFrame) -> (Option<u8>, Event) {
    let p = &frame.payload;
    match frame.kind {
        kind::MODEM_STATUS if !p.is_empty() => {
            (None, Event::ModemStatus(ModemStatus::from(p[0])))
        }
        kind::AT_RESPONSE if p.len() >= 4 => {
            let frame_id = p[0];
            let event = Event::AtResponse(AtResponse {
                command: AtCommand([p[1], p[2]]),
                status: CommandStatus::from(p[3]),
                data: frame.payload.slice(4..),
            });
            (Some(frame_id), event)
        }
        kind::TRANSMIT_STATUS if p.len() >= 6 => {
            let frame_id = p[0];
            let event = Event::TransmitStatus(TransmitStatus {
                frame_id,
                network_address: u16::from_be_bytes([p[1], p[2]]),
                retry_count: p[3],
                delivery_status: DeliveryStatus::from(p[4]),
                discovery_status: DiscoveryStatus::from(p[5]),
            });
            (Some(frame_id), event)
        }
        kind::RECEIVE_PACKET if p.len() >= 11 => {
            let event = Event::ReceivePacket(ReceivePacket {
                source_address: decode_uint(&p[..8]),
                source_network_address: u16::from_be_bytes([p[8], p[9]]),
                options: ReceiveOptions(p[10]),
                data: frame.payload.slice(11..),
            });
            (None, event)
        }
        _ => {
            let event = Event::UnknownFrame(UnknownFrame {
                kind: frame.kind,
                payload: frame.payload,
            });
            (None, event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn raw(kind: u8, payload: &[u8]) -> RawFrame {
        RawFrame {
            kind,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    #[test]
    fn classify_modem_status() {
        let (id, ev) = classify(raw(kind::MODEM_STATUS, &[0x02]));
        assert_eq!(id, None);
        assert!(matches!(ev, Event::ModemStatus(ModemStatus::JoinedNetwork)));
    }

    #[test]
    fn classify_at_response() {
        let (id, ev) = classify(raw(
            kind::AT_RESPONSE,
            &[0x07, b'S', b'H', 0x00, 0x00, 0x13, 0xA2, 0x00],
        ));
        assert_eq!(id, Some(0x07));
        match ev {
            Event::AtResponse(res) => {
                assert_eq!(res.command, AtCommand(*b"SH"));
                assert_eq!(res.status, CommandStatus::Ok);
                assert_eq!(res.data.as_ref(), &[0x00, 0x13, 0xA2, 0x00]);
            }
            other => panic!("expected AtResponse, got {other:?}"),
        }
    }

    #[test]
    fn classify_transmit_status() {
        let (id, ev) = classify(raw(
            kind::TRANSMIT_STATUS,
            &[0x03, 0x12, 0x34, 0x01, 0x00, 0x02],
        ));
        assert_eq!(id, Some(0x03));
        match ev {
            Event::TransmitStatus(ts) => {
                assert_eq!(ts.frame_id, 0x03);
                assert_eq!(ts.network_address, 0x1234);
                assert_eq!(ts.retry_count, 1);
                assert!(ts.delivery_status.is_success());
                assert_eq!(ts.discovery_status, DiscoveryStatus::RouteDiscovery);
            }
            other => panic!("expected TransmitStatus, got {other:?}"),
        }
    }

    #[test]
    fn classify_receive_packet() {
        let mut payload = vec![0x00, 0x13, 0xA2, 0x00, 0x40, 0x00, 0x00, 0x01];
        payload.extend_from_slice(&[0x12, 0x34]); // source network address
        payload.push(0x01); // options: acknowledged
        payload.extend_from_slice(b"ok");
        let (id, ev) = classify(raw(kind::RECEIVE_PACKET, &payload));
        assert_eq!(id, None);
        match ev {
            Event::ReceivePacket(rx) => {
                assert_eq!(rx.source_address, 0x0013_A200_4000_0001);
                assert_eq!(rx.source_network_address, 0x1234);
                assert!(rx.options.contains(ReceiveOptions::ACKNOWLEDGED));
                assert_eq!(rx.data.as_ref(), b"ok");
            }
            other => panic!("expected ReceivePacket, got {other:?}"),
        }
    }

    #[test]
    fn classify_unknown_kind() {
        let (id, ev) = classify(raw(0x91, &[0x01, 0x02]));
        assert_eq!(id, None);
        match ev {
            Event::UnknownFrame(u) => {
                assert_eq!(u.kind, 0x91);
                assert_eq!(u.payload.as_ref(), &[0x01, 0x02]);
            }
            other => panic!("expected UnknownFrame, got {other:?}"),
        }
    }

    #[test]
    fn short_known_kind_demotes_to_unknown() {
        // A 2-byte AT response cannot carry its fixed header.
        let (id, ev) = classify(raw(kind::AT_RESPONSE, &[0x01]));
        assert_eq!(id, None);
        assert!(matches!(ev, Event::UnknownFrame(_)));
    }
}
