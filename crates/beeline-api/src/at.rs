//! AT command identifiers understood by the typed façade.
//!
//! Each identifier is two case-sensitive ASCII bytes. The notes are
//! condensed from the vendor's XBee ZB command reference; parameter
//! ranges are the module's, not enforced by this library unless a
//! method documents otherwise.

use beeline_core::types::AtCommand;

// Addressing

/// Destination Address High. The upper 32 bits of the 64-bit
/// destination address used for transparent-mode transmissions.
/// Special values combined with DL: `0x000000000000FFFF` broadcast,
/// `0x0000000000000000` coordinator.
pub const DH: AtCommand = AtCommand::new(*b"DH");

/// Destination Address Low. The lower 32 bits of the 64-bit
/// destination address.
pub const DL: AtCommand = AtCommand::new(*b"DL");

/// 16-bit Network Address of the module. `0xFFFE` means the module has
/// not joined a network. Read-only.
pub const MY: AtCommand = AtCommand::new(*b"MY");

/// 16-bit Parent Network Address. `0xFFFE` means the module has no
/// parent. Read-only.
pub const MP: AtCommand = AtCommand::new(*b"MP");

/// Number of Remaining Children. How many more end devices can join
/// this device; 0 means no more. Read-only.
pub const NC: AtCommand = AtCommand::new(*b"NC");

/// Serial Number High. The upper 32 bits of the factory-set 64-bit
/// address. Read-only.
pub const SH: AtCommand = AtCommand::new(*b"SH");

/// Serial Number Low. The lower 32 bits of the factory-set 64-bit
/// address. Read-only.
pub const SL: AtCommand = AtCommand::new(*b"SL");

/// Node Identifier. A string of up to 20 printable ASCII bytes,
/// reported in node discovery responses.
pub const NI: AtCommand = AtCommand::new(*b"NI");

/// Maximum RF Payload Bytes for a unicast transmission. APS encryption
/// reduces it by 9 bytes; source routing reduces it further. Read-only.
pub const NP: AtCommand = AtCommand::new(*b"NP");

/// Device Type Identifier. A value used to distinguish different
/// XBee-based products; the vendor reserves `0x0` - `0xFFFFFF`.
pub const DD: AtCommand = AtCommand::new(*b"DD");

/// PAN Conflict Report threshold. The number of PAN id conflict
/// reports that must arrive within one minute to trigger a PAN id
/// change. Range 1 - 0x3F, default 3.
pub const CR: AtCommand = AtCommand::new(*b"CR");

// Networking

/// Extended PAN ID. The 64-bit PAN to form or join; 0 lets a
/// coordinator pick a random id and lets routers/end devices join any.
pub const ID: AtCommand = AtCommand::new(*b"ID");

/// Operating Extended PAN ID, the 64-bit PAN the module is actually
/// running on. Read-only; equals ID when ID is non-zero.
pub const OP: AtCommand = AtCommand::new(*b"OP");

/// Node Discovery Timeout, in units of 100 ms. Included in the ND
/// broadcast so remote devices randomise their responses over the
/// window. Range 0x20 - 0xFF, default 0x3C.
pub const NT: AtCommand = AtCommand::new(*b"NT");

/// Network Discovery Options bitfield: 0x01 append the DD value to
/// responses, 0x02 local device also responds to its own ND.
pub const NO: AtCommand = AtCommand::new(*b"NO");

// Security

/// Encryption Enable. 0 disabled, 1 enabled.
pub const EE: AtCommand = AtCommand::new(*b"EE");

/// Encryption Options bitfield: 0x01 send the key unsecured
/// over-the-air during joins, 0x02 use a trust center (coordinator
/// only).
pub const EO: AtCommand = AtCommand::new(*b"EO");

/// Network Encryption Key, a 128-bit AES key. Write-only; all zeroes
/// makes the module pick a random key.
pub const NK: AtCommand = AtCommand::new(*b"NK");

/// Link Key, a 128-bit AES key. Write-only; zero causes the network
/// key to be exchanged in the clear during joins.
pub const KY: AtCommand = AtCommand::new(*b"KY");

// Serial interfacing

/// API Enable. 1 is unescaped API operation, 2 is escaped. This
/// library only speaks unescaped framing; the register is read for
/// diagnostics.
pub const AP: AtCommand = AtCommand::new(*b"AP");

/// Interface Data Rate between module and host. Values 0-7 select the
/// standard rates in [`STANDARD_DATA_RATES`]; larger values are taken
/// as a literal baud rate and the module stores the closest rate it
/// supports. Default 3 (9600).
pub const BD: AtCommand = AtCommand::new(*b"BD");

// Diagnostics

/// Firmware Version, two bytes. ZB firmware reports 0x2xxx; the low
/// nibble of the high byte designates the coordinator/router/end
/// device AT/API variant. Read-only.
pub const VR: AtCommand = AtCommand::new(*b"VR");

/// Hardware Version, two bytes: platform in the high byte, hardware
/// revision in the low byte. Read-only.
pub const HV: AtCommand = AtCommand::new(*b"HV");

/// Association Indication for the last join attempt; 0 means joined
/// (or, for a coordinator, network formed). Applications should poll
/// until 0. Read-only.
pub const AI: AtCommand = AtCommand::new(*b"AI");

// Execution

/// Apply Changes. Makes queued command register values take effect,
/// e.g. a BD change does not alter the UART rate until applied.
pub const AC: AtCommand = AtCommand::new(*b"AC");

/// Write parameter values to non-volatile memory. Use sparingly; the
/// underlying flash supports a limited number of write cycles.
pub const WR: AtCommand = AtCommand::new(*b"WR");

/// Restore module parameters to factory defaults.
pub const RE: AtCommand = AtCommand::new(*b"RE");

/// Software Reset. The module responds OK immediately and resets about
/// two seconds later.
pub const FR: AtCommand = AtCommand::new(*b"FR");

/// Node Discover. Every module on the PAN responds with its own
/// record; responses arrive as separate AT response frames over the
/// NT window, each sharing the request's frame id.
pub const ND: AtCommand = AtCommand::new(*b"ND");

/// Active Scan of the neighborhood for beacon responses. Local
/// command only; each beacon arrives as a separate AT response frame.
pub const AS: AtCommand = AtCommand::new(*b"AS");

/// The standard serial data rates selected by BD values 0-7.
pub const STANDARD_DATA_RATES: [u32; 8] = [
    1_200, 2_400, 4_800, 9_600, 19_200, 38_400, 57_600, 115_200,
];
