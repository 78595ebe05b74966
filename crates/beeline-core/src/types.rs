//! Core protocol value types.
//!
//! These are the semantic types carried by API frames: the two-byte AT
//! command identifier, the status enumerations the module reports, the
//! option bitfields for transmit/receive/discovery, and the records
//! returned by node discovery and active scan.
//!
//! Numeric values are fixed by the XBee ZB API protocol and must not be
//! changed.

use std::fmt;

/// 64-bit address of the network coordinator.
pub const ADDR_COORDINATOR: u64 = 0x0000_0000_0000_0000;

/// 64-bit broadcast address.
pub const ADDR_BROADCAST: u64 = 0x0000_0000_0000_FFFF;

/// 16-bit network address meaning "unknown / let the module resolve it".
pub const NET_ADDR_UNKNOWN: u16 = 0xFFFE;

/// 16-bit network address used for broadcast transmissions.
pub const NET_ADDR_BROADCAST: u16 = 0xFFFE;

/// A two-ASCII-byte AT command identifier (e.g. `SH`, `ND`).
///
/// Case-sensitive, as on the wire. The known command set is tabulated in
/// `beeline-api`; this type itself accepts any pair so that raw commands
/// outside the typed façade remain expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtCommand(pub [u8; 2]);

impl AtCommand {
    /// Construct an identifier from its two ASCII bytes.
    pub const fn new(bytes: [u8; 2]) -> Self {
        AtCommand(bytes)
    }

    /// The raw identifier bytes as sent on the wire.
    pub const fn as_bytes(&self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for AtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02X}")?;
            }
        }
        Ok(())
    }
}

/// Status byte of an AT command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command succeeded.
    Ok,
    /// Non-specific failure.
    Error,
    /// The module does not recognise the command.
    InvalidCommand,
    /// The module rejected the parameter value.
    InvalidParameter,
    /// The command resulted in a transmit failure.
    TxFailure,
    /// A status byte outside the documented set.
    Other(u8),
}

impl From<u8> for CommandStatus {
    fn from(b: u8) -> Self {
        match b {
            0 => CommandStatus::Ok,
            1 => CommandStatus::Error,
            2 => CommandStatus::InvalidCommand,
            3 => CommandStatus::InvalidParameter,
            4 => CommandStatus::TxFailure,
            other => CommandStatus::Other(other),
        }
    }
}

impl CommandStatus {
    /// The raw status byte.
    pub fn as_u8(&self) -> u8 {
        match self {
            CommandStatus::Ok => 0,
            CommandStatus::Error => 1,
            CommandStatus::InvalidCommand => 2,
            CommandStatus::InvalidParameter => 3,
            CommandStatus::TxFailure => 4,
            CommandStatus::Other(b) => *b,
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Ok => write!(f, "OK"),
            CommandStatus::Error => write!(f, "Error"),
            CommandStatus::InvalidCommand => write!(f, "InvalidCommand"),
            CommandStatus::InvalidParameter => write!(f, "InvalidParameter"),
            CommandStatus::TxFailure => write!(f, "TxFailure"),
            CommandStatus::Other(b) => write!(f, "CommandStatus({b})"),
        }
    }
}

/// Modem status reported in an unsolicited `0x8A` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemStatus {
    HardwareReset,
    WatchdogTimerReset,
    /// Routers and end devices only.
    JoinedNetwork,
    Disassociated,
    CoordinatorStarted,
    NetworkKeyUpdated,
    /// PRO S2B hardware only.
    VoltageSupplyLimitExceeded,
    ConfigChangeDuringJoin,
    /// Values `0x80` and above indicate Ember stack errors.
    StackError(u8),
    /// A status byte outside the documented set.
    Other(u8),
}

impl From<u8> for ModemStatus {
    fn from(b: u8) -> Self {
        match b {
            0x00 => ModemStatus::HardwareReset,
            0x01 => ModemStatus::WatchdogTimerReset,
            0x02 => ModemStatus::JoinedNetwork,
            0x03 => ModemStatus::Disassociated,
            0x06 => ModemStatus::CoordinatorStarted,
            0x07 => ModemStatus::NetworkKeyUpdated,
            0x0D => ModemStatus::VoltageSupplyLimitExceeded,
            0x11 => ModemStatus::ConfigChangeDuringJoin,
            b if b >= 0x80 => ModemStatus::StackError(b),
            other => ModemStatus::Other(other),
        }
    }
}

impl ModemStatus {
    /// The raw status byte.
    pub fn as_u8(&self) -> u8 {
        match self {
            ModemStatus::HardwareReset => 0x00,
            ModemStatus::WatchdogTimerReset => 0x01,
            ModemStatus::JoinedNetwork => 0x02,
            ModemStatus::Disassociated => 0x03,
            ModemStatus::CoordinatorStarted => 0x06,
            ModemStatus::NetworkKeyUpdated => 0x07,
            ModemStatus::VoltageSupplyLimitExceeded => 0x0D,
            ModemStatus::ConfigChangeDuringJoin => 0x11,
            ModemStatus::StackError(b) | ModemStatus::Other(b) => *b,
        }
    }
}

impl fmt::Display for ModemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModemStatus::HardwareReset => write!(f, "HardwareReset"),
            ModemStatus::WatchdogTimerReset => write!(f, "WatchdogTimerReset"),
            ModemStatus::JoinedNetwork => write!(f, "JoinedNetwork"),
            ModemStatus::Disassociated => write!(f, "Disassociated"),
            ModemStatus::CoordinatorStarted => write!(f, "CoordinatorStarted"),
            ModemStatus::NetworkKeyUpdated => write!(f, "NetworkKeyUpdated"),
            ModemStatus::VoltageSupplyLimitExceeded => write!(f, "VoltageSupplyLimitExceeded"),
            ModemStatus::ConfigChangeDuringJoin => write!(f, "ConfigChangeDuringJoin"),
            ModemStatus::StackError(b) => write!(f, "StackError({b:#04x})"),
            ModemStatus::Other(b) => write!(f, "ModemStatus({b})"),
        }
    }
}

/// Delivery status byte of a ZigBee transmit status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Success,
    MacAckFailure,
    CcaFailure,
    InvalidDestinationEndpoint,
    NetworkAckFailure,
    NotJoinedToNetwork,
    SelfAddressed,
    AddressNotFound,
    RouteNotFound,
    /// Broadcast source failed to hear a neighbor relay the message.
    BroadcastRelayFailure,
    InvalidBindingTableIndex,
    /// Lack of free buffers, timers, and so forth.
    ResourceError,
    AttemptedBroadcastWithApsTransmission,
    /// Attempted unicast with APS transmission, but EE=0.
    AttemptedUnicastWithApsTransmission,
    /// Second resource-error code the firmware can report.
    ResourceShortage,
    DataPayloadTooLarge,
    /// A status byte outside the documented set.
    Other(u8),
}

impl From<u8> for DeliveryStatus {
    fn from(b: u8) -> Self {
        match b {
            0x00 => DeliveryStatus::Success,
            0x01 => DeliveryStatus::MacAckFailure,
            0x02 => DeliveryStatus::CcaFailure,
            0x15 => DeliveryStatus::InvalidDestinationEndpoint,
            0x21 => DeliveryStatus::NetworkAckFailure,
            0x22 => DeliveryStatus::NotJoinedToNetwork,
            0x23 => DeliveryStatus::SelfAddressed,
            0x24 => DeliveryStatus::AddressNotFound,
            0x25 => DeliveryStatus::RouteNotFound,
            0x26 => DeliveryStatus::BroadcastRelayFailure,
            0x2B => DeliveryStatus::InvalidBindingTableIndex,
            0x2C => DeliveryStatus::ResourceError,
            0x2D => DeliveryStatus::AttemptedBroadcastWithApsTransmission,
            0x2E => DeliveryStatus::AttemptedUnicastWithApsTransmission,
            0x32 => DeliveryStatus::ResourceShortage,
            0x74 => DeliveryStatus::DataPayloadTooLarge,
            other => DeliveryStatus::Other(other),
        }
    }
}

impl DeliveryStatus {
    /// Returns `true` if the transmission was delivered.
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryStatus::Success)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Success => write!(f, "Success"),
            DeliveryStatus::MacAckFailure => write!(f, "MacAckFailure"),
            DeliveryStatus::CcaFailure => write!(f, "CcaFailure"),
            DeliveryStatus::InvalidDestinationEndpoint => write!(f, "InvalidDestinationEndpoint"),
            DeliveryStatus::NetworkAckFailure => write!(f, "NetworkAckFailure"),
            DeliveryStatus::NotJoinedToNetwork => write!(f, "NotJoinedToNetwork"),
            DeliveryStatus::SelfAddressed => write!(f, "SelfAddressed"),
            DeliveryStatus::AddressNotFound => write!(f, "AddressNotFound"),
            DeliveryStatus::RouteNotFound => write!(f, "RouteNotFound"),
            DeliveryStatus::BroadcastRelayFailure => write!(f, "BroadcastRelayFailure"),
            DeliveryStatus::InvalidBindingTableIndex => write!(f, "InvalidBindingTableIndex"),
            DeliveryStatus::ResourceError => write!(f, "ResourceError"),
            DeliveryStatus::AttemptedBroadcastWithApsTransmission => {
                write!(f, "AttemptedBroadcastWithApsTransmission")
            }
            DeliveryStatus::AttemptedUnicastWithApsTransmission => {
                write!(f, "AttemptedUnicastWithApsTransmission")
            }
            DeliveryStatus::ResourceShortage => write!(f, "ResourceShortage"),
            DeliveryStatus::DataPayloadTooLarge => write!(f, "DataPayloadTooLarge"),
            DeliveryStatus::Other(b) => write!(f, "DeliveryStatus({b:#04x})"),
        }
    }
}

/// Discovery status byte of a ZigBee transmit status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    NoDiscoveryOverhead,
    AddressDiscovery,
    RouteDiscovery,
    AddressAndRoute,
    ExtendedTimeoutDiscovery,
    /// A status byte outside the documented set.
    Other(u8),
}

impl From<u8> for DiscoveryStatus {
    fn from(b: u8) -> Self {
        match b {
            0x00 => DiscoveryStatus::NoDiscoveryOverhead,
            0x01 => DiscoveryStatus::AddressDiscovery,
            0x02 => DiscoveryStatus::RouteDiscovery,
            0x03 => DiscoveryStatus::AddressAndRoute,
            0x40 => DiscoveryStatus::ExtendedTimeoutDiscovery,
            other => DiscoveryStatus::Other(other),
        }
    }
}

impl fmt::Display for DiscoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryStatus::NoDiscoveryOverhead => write!(f, "NoDiscoveryOverhead"),
            DiscoveryStatus::AddressDiscovery => write!(f, "AddressDiscovery"),
            DiscoveryStatus::RouteDiscovery => write!(f, "RouteDiscovery"),
            DiscoveryStatus::AddressAndRoute => write!(f, "AddressAndRoute"),
            DiscoveryStatus::ExtendedTimeoutDiscovery => write!(f, "ExtendedTimeoutDiscovery"),
            DiscoveryStatus::Other(b) => write!(f, "DiscoveryStatus({b:#04x})"),
        }
    }
}

/// Role of a device on the ZigBee network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Coordinator,
    Router,
    EndDevice,
    /// A type byte outside the documented set.
    Other(u8),
}

impl From<u8> for DeviceType {
    fn from(b: u8) -> Self {
        match b {
            0 => DeviceType::Coordinator,
            1 => DeviceType::Router,
            2 => DeviceType::EndDevice,
            other => DeviceType::Other(other),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Coordinator => write!(f, "Coordinator"),
            DeviceType::Router => write!(f, "Router"),
            DeviceType::EndDevice => write!(f, "EndDevice"),
            DeviceType::Other(b) => write!(f, "DeviceType({b})"),
        }
    }
}

/// Joins the names of set flags with `|`, or prints `None` for an empty
/// bitfield, appending any unrecognised remainder as `label(0xNN)`.
fn format_flags(
    f: &mut fmt::Formatter<'_>,
    bits: u8,
    known: &[(u8, &str)],
    label: &str,
) -> fmt::Result {
    if bits == 0 {
        return write!(f, "None");
    }
    let mut rest = bits;
    let mut first = true;
    for (bit, name) in known {
        if rest & bit != 0 {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{name}")?;
            rest &= !bit;
            first = false;
        }
    }
    if rest != 0 {
        if !first {
            write!(f, "|")?;
        }
        write!(f, "{label}({rest:#04x})")?;
    }
    Ok(())
}

/// Options bitfield of a received packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiveOptions(pub u8);

impl ReceiveOptions {
    /// The packet was acknowledged.
    pub const ACKNOWLEDGED: ReceiveOptions = ReceiveOptions(0x01);
    /// The packet was a broadcast.
    pub const BROADCAST: ReceiveOptions = ReceiveOptions(0x02);
    /// The packet was encrypted with APS encryption.
    pub const APS_ENCRYPTED: ReceiveOptions = ReceiveOptions(0x20);
    /// The packet was sent from an end device.
    pub const FROM_END_DEVICE: ReceiveOptions = ReceiveOptions(0x40);

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(&self, other: ReceiveOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw option bits.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for ReceiveOptions {
    type Output = ReceiveOptions;
    fn bitor(self, rhs: ReceiveOptions) -> ReceiveOptions {
        ReceiveOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for ReceiveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_flags(
            f,
            self.0,
            &[
                (0x01, "Acknowledged"),
                (0x02, "Broadcast"),
                (0x20, "ApsEncrypted"),
                (0x40, "FromEndDevice"),
            ],
            "ReceiveOptions",
        )
    }
}

/// Options bitfield of a ZigBee transmit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransmitOptions(pub u8);

impl TransmitOptions {
    /// Disable retries and route repair for this transmission.
    pub const DISABLE_RETRIES: TransmitOptions = TransmitOptions(0x01);
    /// Enable APS encryption (requires EE=1); reduces the maximum
    /// payload by 9 bytes.
    pub const APS_ENCRYPTION: TransmitOptions = TransmitOptions(0x20);
    /// Use the extended transmission timeout for this destination.
    pub const EXTENDED_TIMEOUT: TransmitOptions = TransmitOptions(0x40);

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(&self, other: TransmitOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw option bits.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for TransmitOptions {
    type Output = TransmitOptions;
    fn bitor(self, rhs: TransmitOptions) -> TransmitOptions {
        TransmitOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for TransmitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_flags(
            f,
            self.0,
            &[
                (0x01, "DisableRetries"),
                (0x20, "ApsEncryption"),
                (0x40, "ExtendedTimeout"),
            ],
            "TransmitOptions",
        )
    }
}

/// Options bitfield for the network discovery (`NO`) register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeDiscoveryOptions(pub u8);

impl NodeDiscoveryOptions {
    /// Append the DD (device type identifier) value to ND responses.
    pub const APPEND_DD: NodeDiscoveryOptions = NodeDiscoveryOptions(0x01);
    /// The local device sends its own ND response when ND is issued.
    pub const INCLUDE_LOCAL_DEVICE: NodeDiscoveryOptions = NodeDiscoveryOptions(0x02);

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(&self, other: NodeDiscoveryOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw option bits.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for NodeDiscoveryOptions {
    type Output = NodeDiscoveryOptions;
    fn bitor(self, rhs: NodeDiscoveryOptions) -> NodeDiscoveryOptions {
        NodeDiscoveryOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for NodeDiscoveryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_flags(
            f,
            self.0,
            &[(0x01, "AppendDD"), (0x02, "IncludeLocalDevice")],
            "NodeDiscoveryOptions",
        )
    }
}

/// Options bitfield for the encryption options (`EO`) register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecurityOptions(pub u8);

impl SecurityOptions {
    /// Send the security key unsecured over-the-air during joins.
    pub const SEND_KEY_UNSECURED: SecurityOptions = SecurityOptions(0x01);
    /// Use a trust center (coordinator only).
    pub const USE_TRUST_CENTER: SecurityOptions = SecurityOptions(0x02);

    /// Returns `true` if every flag in `other` is set.
    pub fn contains(&self, other: SecurityOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw option bits.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for SecurityOptions {
    type Output = SecurityOptions;
    fn bitor(self, rhs: SecurityOptions) -> SecurityOptions {
        SecurityOptions(self.0 | rhs.0)
    }
}

impl fmt::Display for SecurityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_flags(
            f,
            self.0,
            &[(0x01, "SendKeyUnsecured"), (0x02, "UseTrustCenter")],
            "SecurityOptions",
        )
    }
}

/// A device reported by node discovery (`ND`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 16-bit network address of the responding device.
    pub network_address: u16,
    /// Unique 64-bit serial number (MAC address).
    pub serial_number: u64,
    /// Node identifier string (up to 20 printable ASCII bytes).
    pub node_id: String,
    /// 16-bit network address of the device's parent, or
    /// [`NET_ADDR_UNKNOWN`] if it has none.
    pub parent_network_address: u16,
    /// Coordinator, router, or end device.
    pub device_type: DeviceType,
    /// Reserved status byte.
    pub status: u8,
    /// ZigBee application profile identifier.
    pub profile_id: u16,
    /// Manufacturer identifier.
    pub manufacturer_id: u16,
}

/// A beacon response reported by active scan (`AS`).
///
/// ZB firmware reports scan type 2; the Wi-Fi XBee family uses a
/// different format (type 1) that this driver does not speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveScanDevice {
    /// Scan record type (2 for ZB firmware).
    pub scan_type: u8,
    /// Operating channel.
    pub channel: u8,
    /// 16-bit PAN identifier.
    pub pan_id: u16,
    /// 64-bit extended PAN identifier.
    pub extended_pan_id: u64,
    /// Whether the network is accepting join requests.
    pub allow_join: bool,
    /// ZigBee stack profile.
    pub stack_profile: u8,
    /// Link quality indicator; higher values are better.
    pub lqi: u8,
    /// Received signal strength; lower values are better.
    pub rssi: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_command_display() {
        assert_eq!(AtCommand(*b"SH").to_string(), "SH");
        assert_eq!(AtCommand(*b"ND").to_string(), "ND");
        assert_eq!(AtCommand([0x01, b'A']).to_string(), "\\x01A");
    }

    #[test]
    fn command_status_round_trip() {
        for b in 0..=5u8 {
            assert_eq!(CommandStatus::from(b).as_u8(), b);
        }
        assert_eq!(CommandStatus::from(0x42), CommandStatus::Other(0x42));
    }

    #[test]
    fn modem_status_mapping() {
        assert_eq!(ModemStatus::from(0x02), ModemStatus::JoinedNetwork);
        assert_eq!(ModemStatus::from(0x80), ModemStatus::StackError(0x80));
        assert_eq!(ModemStatus::from(0x12), ModemStatus::Other(0x12));
        assert_eq!(ModemStatus::from(0x02).to_string(), "JoinedNetwork");
        assert_eq!(ModemStatus::from(0x90).to_string(), "StackError(0x90)");
    }

    #[test]
    fn delivery_status_mapping() {
        assert!(DeliveryStatus::from(0x00).is_success());
        assert!(!DeliveryStatus::from(0x24).is_success());
        assert_eq!(DeliveryStatus::from(0x25), DeliveryStatus::RouteNotFound);
        assert_eq!(
            DeliveryStatus::from(0x33),
            DeliveryStatus::Other(0x33)
        );
    }

    #[test]
    fn device_type_mapping() {
        assert_eq!(DeviceType::from(0), DeviceType::Coordinator);
        assert_eq!(DeviceType::from(1), DeviceType::Router);
        assert_eq!(DeviceType::from(2), DeviceType::EndDevice);
        assert_eq!(DeviceType::from(7).to_string(), "DeviceType(7)");
    }

    #[test]
    fn receive_options_contains() {
        let opts = ReceiveOptions::ACKNOWLEDGED | ReceiveOptions::BROADCAST;
        assert!(opts.contains(ReceiveOptions::ACKNOWLEDGED));
        assert!(opts.contains(ReceiveOptions::BROADCAST));
        assert!(!opts.contains(ReceiveOptions::APS_ENCRYPTED));
    }

    #[test]
    fn receive_options_display_names_each_flag() {
        assert_eq!(ReceiveOptions(0).to_string(), "None");
        assert_eq!(
            (ReceiveOptions::ACKNOWLEDGED | ReceiveOptions::FROM_END_DEVICE).to_string(),
            "Acknowledged|FromEndDevice"
        );
        // Unknown bits are kept visible rather than silently dropped.
        assert_eq!(
            ReceiveOptions(0x81).to_string(),
            "Acknowledged|ReceiveOptions(0x80)"
        );
    }

    #[test]
    fn transmit_options_display_names_each_flag() {
        assert_eq!(
            (TransmitOptions::DISABLE_RETRIES | TransmitOptions::EXTENDED_TIMEOUT).to_string(),
            "DisableRetries|ExtendedTimeout"
        );
        assert_eq!(TransmitOptions(0x20).to_string(), "ApsEncryption");
    }

    #[test]
    fn discovery_options_display() {
        assert_eq!(
            (NodeDiscoveryOptions::APPEND_DD | NodeDiscoveryOptions::INCLUDE_LOCAL_DEVICE)
                .to_string(),
            "AppendDD|IncludeLocalDevice"
        );
    }

    #[test]
    fn security_options_display() {
        assert_eq!(SecurityOptions(0).to_string(), "None");
        assert_eq!(
            SecurityOptions::USE_TRUST_CENTER.to_string(),
            "UseTrustCenter"
        );
    }
}
