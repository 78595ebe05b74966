//! API frame encoder/decoder.
//!
//! The XBee API mode 1 (unescaped) wire format frames every exchange
//! between host and module. This module handles the pure byte-level
//! encoding and decoding: delimiter scanning, the big-endian length
//! prefix, and checksum validation.
//!
//! # Frame format
//!
//! ```text
//! 0x7E <lenHi> <lenLo> <kind> [<data>...] <checksum>
//! ```
//!
//! - Delimiter: one `0x7E` byte
//! - `len`: payload length, big-endian, not counting delimiter, length,
//!   or checksum
//! - Payload: the frame kind byte followed by kind-specific data
//! - `checksum`: chosen so that `(sum(payload) + checksum) & 0xFF == 0xFF`

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Start-of-frame delimiter.
pub const FRAME_DELIMITER: u8 = 0x7E;

/// Frame kind bytes, fixed by the API protocol.
pub mod kind {
    /// AT command request, applied immediately.
    pub const AT_COMMAND: u8 = 0x08;
    /// AT command request, queued until changes are applied.
    pub const AT_COMMAND_QUEUE: u8 = 0x09;
    /// ZigBee transmit request.
    pub const TRANSMIT_REQUEST: u8 = 0x10;
    /// AT command response.
    pub const AT_RESPONSE: u8 = 0x88;
    /// Unsolicited modem status.
    pub const MODEM_STATUS: u8 = 0x8A;
    /// ZigBee transmit status.
    pub const TRANSMIT_STATUS: u8 = 0x8B;
    /// ZigBee receive packet.
    pub const RECEIVE_PACKET: u8 = 0x90;
}

/// Maximum payload length the 16-bit length field can express.
pub const MAX_PAYLOAD: usize = 65_535;

/// Maximum parameter length for an AT command request
/// (payload minus kind, frame id, and the two command bytes, with
/// headroom matching the module's own limit).
pub const MAX_AT_PARAMETER: usize = 65_528;

/// Maximum data length for a ZigBee transmit request
/// (payload minus kind, frame id, and the 12 addressing/option bytes,
/// with headroom matching the module's own limit).
pub const MAX_TRANSMIT_DATA: usize = 65_516;

/// A decoded frame: the kind byte plus everything after it.
///
/// `payload` is split off the decoder's input buffer, so it stays valid
/// (and allocation-free) after the decoder moves on to the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// The frame kind byte (first payload byte on the wire).
    pub kind: u8,
    /// Payload bytes after the kind byte.
    pub payload: Bytes,
}

/// Why the decoder discarded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A non-delimiter byte was skipped while scanning for frame start.
    Resync(u8),
    /// A complete frame failed checksum validation; the value is the
    /// (wrong) sum of payload plus checksum byte, which should have
    /// been `0xFF`.
    BadChecksum(u8),
    /// A complete, checksum-valid frame whose payload is too short to
    /// carry a kind byte and any content (length < 2).
    TinyFrame,
}

/// Result of attempting to decode one frame from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    /// A complete, valid frame. The consumed bytes have been removed
    /// from the input buffer.
    Frame(RawFrame),
    /// The buffer does not yet contain a complete frame; nothing was
    /// consumed. More data is needed.
    Incomplete,
    /// Input was consumed and discarded; the reason says why. The
    /// caller should log it and call again.
    Discard(DiscardReason),
}

/// Compute the checksum byte for a payload.
pub fn checksum(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    0xFF - sum
}

/// Encode a frame from its kind byte and the payload bytes that follow
/// it, producing the full wire format.
///
/// # Example
///
/// ```
/// use beeline_api::frame::{encode_frame, kind};
///
/// // AT command "SH" with frame id 1
/// let bytes = encode_frame(kind::AT_COMMAND, &[0x01, b'S', b'H']);
/// assert_eq!(bytes, vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x53, 0x48, 0x5B]);
/// ```
///
/// # Panics
///
/// Panics if `1 + data.len()` exceeds [`MAX_PAYLOAD`]. Callers enforce
/// the tighter per-kind limits ([`MAX_AT_PARAMETER`],
/// [`MAX_TRANSMIT_DATA`]) before encoding.
pub fn encode_frame(kind: u8, data: &[u8]) -> Vec<u8> {
    let len = 1 + data.len();
    assert!(len <= MAX_PAYLOAD, "frame payload too long: {len}");
    let mut buf = BytesMut::with_capacity(4 + len);
    buf.put_u8(FRAME_DELIMITER);
    buf.put_u16(len as u16);
    buf.put_u8(kind);
    buf.put_slice(data);
    let check = checksum(&buf[3..]);
    buf.put_u8(check);
    buf.to_vec()
}

/// Attempt to decode one frame from the front of `buf`.
///
/// Consumes exactly what it reports: a [`DecodeResult::Frame`] removes
/// the whole frame, a [`DecodeResult::Discard`] removes the offending
/// bytes, and [`DecodeResult::Incomplete`] leaves the buffer untouched
/// for the next read. Callers drain by looping until `Incomplete`.
pub fn decode_frame(buf: &mut BytesMut) -> DecodeResult {
    let Some(&first) = buf.first() else {
        return DecodeResult::Incomplete;
    };
    if first != FRAME_DELIMITER {
        buf.advance(1);
        return DecodeResult::Discard(DiscardReason::Resync(first));
    }
    if buf.len() < 3 {
        return DecodeResult::Incomplete;
    }
    let len = u16::from_be_bytes([buf[1], buf[2]]) as usize;
    // Delimiter + length + payload + checksum.
    if buf.len() < 4 + len {
        return DecodeResult::Incomplete;
    }

    let frame = buf.split_to(4 + len).freeze();
    let payload = frame.slice(3..3 + len);
    let check = frame[3 + len];

    let sum = payload.iter().fold(check, |acc, b| acc.wrapping_add(*b));
    if sum != 0xFF {
        return DecodeResult::Discard(DiscardReason::BadChecksum(sum));
    }
    if len < 2 {
        // Real frames carry at least a kind byte and one content byte.
        return DecodeResult::Discard(DiscardReason::TinyFrame);
    }

    DecodeResult::Frame(RawFrame {
        kind: payload[0],
        payload: payload.slice(1..),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode everything in `bytes`, collecting the outcomes.
    fn decode_all(bytes: &[u8]) -> (Vec<RawFrame>, Vec<DiscardReason>) {
        let mut buf = BytesMut::from(bytes);
        let mut frames = Vec::new();
        let mut discards = Vec::new();
        loop {
            match decode_frame(&mut buf) {
                DecodeResult::Frame(f) => frames.push(f),
                DecodeResult::Discard(r) => discards.push(r),
                DecodeResult::Incomplete => break,
            }
        }
        (frames, discards)
    }

    #[test]
    fn encode_at_command_sh() {
        // "SH" request with frame id 1, as sent on the wire.
        let bytes = encode_frame(kind::AT_COMMAND, &[0x01, b'S', b'H']);
        assert_eq!(
            bytes,
            vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x53, 0x48, 0x5B]
        );
    }

    #[test]
    fn encode_checksum_closes_to_ff() {
        let bytes = encode_frame(kind::TRANSMIT_REQUEST, &[0x03, 0xAA, 0x55]);
        let payload = &bytes[3..bytes.len() - 1];
        let check = bytes[bytes.len() - 1];
        let sum = payload
            .iter()
            .fold(check, |acc, b| acc.wrapping_add(*b));
        assert_eq!(sum, 0xFF);
    }

    #[test]
    fn decode_at_response() {
        // AT response to "SH" carrying serial-high 0x0013A200.
        let bytes = [
            0x7E, 0x00, 0x08, 0x88, 0x01, 0x53, 0x48, 0x00, 0x00, 0x13, 0xA2, 0x00, 0x5F,
        ];
        let (frames, discards) = decode_all(&bytes);
        assert!(discards.is_empty());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].kind, kind::AT_RESPONSE);
        assert_eq!(
            frames[0].payload.as_ref(),
            &[0x01, 0x53, 0x48, 0x00, 0x00, 0x13, 0xA2, 0x00]
        );
    }

    #[test]
    fn round_trip_various_lengths() {
        // Deterministic pseudo-random payload bytes.
        let mut seed = 0x2F6E_2B1Cu32;
        let mut next = move || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 24) as u8
        };
        // Payload length is 1 + data_len; single-byte payloads are the
        // tiny-frame case covered separately.
        for data_len in [1usize, 2, 7, 64, 255, 1024] {
            let data: Vec<u8> = (0..data_len).map(|_| next()).collect();
            let kind_byte = next();
            let mut buf = BytesMut::from(encode_frame(kind_byte, &data).as_slice());
            match decode_frame(&mut buf) {
                DecodeResult::Frame(f) => {
                    assert_eq!(f.kind, kind_byte);
                    assert_eq!(f.payload.as_ref(), data.as_slice());
                    assert!(buf.is_empty());
                }
                other => panic!("expected frame for data_len {data_len}, got {other:?}"),
            }
        }
    }

    #[test]
    fn resync_skips_noise_and_yields_frame_once() {
        let mut bytes = vec![0x00, 0x42, 0xFF, 0x13];
        bytes.extend_from_slice(&encode_frame(kind::MODEM_STATUS, &[0x02]));
        let (frames, discards) = decode_all(&bytes);
        assert_eq!(discards.len(), 4);
        assert!(matches!(discards[0], DiscardReason::Resync(0x00)));
        assert!(matches!(discards[3], DiscardReason::Resync(0x13)));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].kind, kind::MODEM_STATUS);
    }

    #[test]
    fn bad_checksum_is_discarded() {
        let mut bytes = encode_frame(kind::MODEM_STATUS, &[0x02]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let (frames, discards) = decode_all(&bytes);
        assert!(frames.is_empty());
        assert_eq!(discards.len(), 1);
        assert!(matches!(discards[0], DiscardReason::BadChecksum(_)));
    }

    #[test]
    fn single_bit_flips_never_yield_the_frame() {
        let good = encode_frame(kind::AT_RESPONSE, &[0x01, b'V', b'R', 0x00, 0x21, 0xA7]);
        // Flip each bit of the payload and checksum regions in turn.
        for byte_ix in 3..good.len() {
            for bit in 0..8 {
                let mut corrupt = good.clone();
                corrupt[byte_ix] ^= 1 << bit;
                let (frames, _) = decode_all(&corrupt);
                assert!(
                    frames.is_empty(),
                    "flip at byte {byte_ix} bit {bit} still decoded"
                );
            }
        }
    }

    #[test]
    fn tiny_frame_is_discarded() {
        // Length 1: a bare modem-status kind byte with a valid checksum.
        let bytes = [0x7E, 0x00, 0x01, 0x8A, 0x75];
        let (frames, discards) = decode_all(&bytes);
        assert!(frames.is_empty());
        assert_eq!(discards, vec![DiscardReason::TinyFrame]);
    }

    #[test]
    fn incomplete_frame_leaves_buffer_untouched() {
        let full = encode_frame(kind::RECEIVE_PACKET, &[0x01, 0x02, 0x03, 0x04]);
        for cut in 0..full.len() {
            let mut buf = BytesMut::from(&full[..cut]);
            assert_eq!(decode_frame(&mut buf), DecodeResult::Incomplete);
            assert_eq!(buf.len(), cut);
        }
    }

    #[test]
    fn back_to_back_frames_decode_in_order() {
        let mut bytes = encode_frame(kind::MODEM_STATUS, &[0x06]);
        bytes.extend_from_slice(&encode_frame(kind::MODEM_STATUS, &[0x02]));
        let (frames, discards) = decode_all(&bytes);
        assert!(discards.is_empty());
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].payload.as_ref(), &[0x06]);
        assert_eq!(frames[1].payload.as_ref(), &[0x02]);
    }

    #[test]
    fn checksum_survives_overflowing_sums() {
        let data = vec![0xFF; 300];
        let bytes = encode_frame(kind::TRANSMIT_REQUEST, &data);
        let mut buf = BytesMut::from(bytes.as_slice());
        assert!(matches!(decode_frame(&mut buf), DecodeResult::Frame(_)));
    }
}
