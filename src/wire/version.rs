use crate::wire::constants::{NETWORK_LABEL, PROTOCOL_VERSION, SUBVERSION};
use crate::wire::error::CodecError;
use crate::wire::message::{Command, Payload};
use crate::wire::net_addr::NetAddr;
use crate::wire::reader::Reader;
use crate::wire::util;
use crate::wire::writer::Writer;
use std::fmt::{Debug, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service flags advertised in the `version` message.
///
/// A `u64` bitfield; each bit is a capability supported by the node, so the
/// field is unsigned. Unknown bits must be preserved.
///
/// https://developer.bitcoin.org/reference/p2p_networking.html#version
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Services(u64);

impl Services {
    /// Not a full node; may only relay transactions it originates.
    pub const NONE: Services = Services(0x00);

    /// Full node, can be asked for full blocks.
    pub const NODE_NETWORK: Services = Services(0x01);

    /// Supports bloom-filtered connections (BIP 111).
    pub const NODE_BLOOM: Services = Services(0x04);

    /// Can provide blocks and transactions with witness data (BIP 144).
    pub const NODE_WITNESS: Services = Services(0x08);

    /// Full node guaranteeing only the last 288 blocks (BIP 159).
    pub const NODE_NETWORK_LIMITED: Services = Services(0x0400);

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// True if all bits in `other` are set.
    pub const fn contains(self, other: Services) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::NODE_NETWORK) {
            names.push("NODE_NETWORK");
        }
        if self.contains(Self::NODE_BLOOM) {
            names.push("NODE_BLOOM");
        }
        if self.contains(Self::NODE_WITNESS) {
            names.push("NODE_WITNESS");
        }
        if self.contains(Self::NODE_NETWORK_LIMITED) {
            names.push("NODE_NETWORK_LIMITED");
        }
        names
    }
}

impl From<u64> for Services {
    fn from(value: u64) -> Self {
        Services::new(value)
    }
}

impl Debug for Services {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "Services(NONE)");
        }
        write!(
            f,
            "Services({}) [0x{:016x}]",
            self.names().join(" | "),
            self.bits()
        )
    }
}

/// Protocol-level defaults applied when building an outbound handshake.
///
/// Passed explicitly into [`VersionBuilder::build`]; the codec never reads
/// ambient or global configuration.
#[derive(Debug, Clone)]
pub struct ProtocolConfig {
    pub protocol_version: u32,
    pub subversion: String,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            subversion: SUBVERSION.to_string(),
        }
    }
}

/// The connection-handshake message, first thing exchanged by two peers.
///
/// Payload layout, all little-endian except the address ports:
///
/// ```text
/// u32      version
/// u64      services
/// u64      timestamp (seconds since epoch)
/// var_str  chain/branch label (decode-side; discarded)
/// net_addr addr_me
/// net_addr addr_you
/// 8 bytes  nonce
/// var_str  subversion (user agent)
/// u32      start_height
/// u8       relay (optional; absent ⇒ true, pre-BIP37 peers omit it)
/// ```
///
/// Encode mirrors the decode field order with two deliberate asymmetries,
/// reproduced as observed wire behavior rather than unified:
///
/// - the timestamp is written as a whole-second u32 zero-extended into the
///   8-byte field, while decode reads a full u64
/// - the chain label is written as the fixed 4-byte literal `main`, while
///   decode accepts a variable-length label and discards it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMessage {
    pub version: u32,
    pub services: Services,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub addr_me: NetAddr,
    pub addr_you: NetAddr,
    /// Exactly 8 opaque bytes, always present.
    pub nonce: [u8; 8],
    pub subversion: String,
    pub start_height: u32,
    pub relay: bool,
}

impl VersionMessage {
    pub fn builder() -> VersionBuilder {
        VersionBuilder::default()
    }
}

impl Payload for VersionMessage {
    const COMMAND: Command = Command::Version;

    fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_u32_le(self.version);
        w.write_u64_le(self.services.bits());

        // second-precision u32 into the 8-byte timestamp field, upper half zero
        w.write_u32_le(self.timestamp as u32);
        w.write_u32_le(0);

        w.write_var_bytes(NETWORK_LABEL);

        self.addr_me.encode(&mut w);
        self.addr_you.encode(&mut w);
        w.write_bytes(&self.nonce);
        w.write_var_bytes(self.subversion.as_bytes());
        w.write_u32_le(self.start_height);

        // exactly 0x00 or 0x01 to keep the encoding canonical; decode
        // tolerates any nonzero byte
        w.write_u8(self.relay as u8);

        w.concat()
    }

    fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(payload);

        let version = r.read_u32_le("version: version")?;
        let services = Services::from(r.read_u64_le("version: services")?);
        let timestamp = r.read_u64_le("version: timestamp")?;

        // chain/branch label, present for fork compatibility; not retained
        let _label = r.read_var_bytes("version: network label")?;

        let addr_me = NetAddr::decode(&mut r)?;
        let addr_you = NetAddr::decode(&mut r)?;
        let nonce = r.read_array("version: nonce")?;
        let subversion =
            String::from_utf8_lossy(r.read_var_bytes("version: subversion")?).into_owned();
        let start_height = r.read_u32_le("version: start_height")?;

        // pre-BIP37 peers end the payload here; absence means relay
        let relay = if r.finished() {
            true
        } else {
            r.read_u8("version: relay")? != 0
        };

        r.check_finished()?;

        Ok(VersionMessage {
            version,
            services,
            timestamp,
            addr_me,
            addr_you,
            nonce,
            subversion,
            start_height,
            relay,
        })
    }
}

/// Builder for an outbound [`VersionMessage`] with every optional field
/// enumerated and its default stated.
///
/// Defaults applied by [`build`](Self::build): protocol version and
/// subversion from the supplied [`ProtocolConfig`], a fresh random nonce,
/// the current time, `NODE_NETWORK` services, zeroed addresses, start height
/// 0 and relay on.
#[derive(Debug, Default)]
pub struct VersionBuilder {
    version: Option<u32>,
    services: Option<Services>,
    timestamp: Option<u64>,
    addr_me: Option<NetAddr>,
    addr_you: Option<NetAddr>,
    nonce: Option<[u8; 8]>,
    subversion: Option<String>,
    start_height: Option<u32>,
    relay: Option<bool>,
}

impl VersionBuilder {
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    pub fn timestamp(mut self, seconds_since_epoch: u64) -> Self {
        self.timestamp = Some(seconds_since_epoch);
        self
    }

    pub fn addr_me(mut self, addr: NetAddr) -> Self {
        self.addr_me = Some(addr);
        self
    }

    pub fn addr_you(mut self, addr: NetAddr) -> Self {
        self.addr_you = Some(addr);
        self
    }

    pub fn nonce(mut self, nonce: [u8; 8]) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn subversion(mut self, subversion: impl Into<String>) -> Self {
        self.subversion = Some(subversion.into());
        self
    }

    pub fn start_height(mut self, height: u32) -> Self {
        self.start_height = Some(height);
        self
    }

    pub fn relay(mut self, relay: bool) -> Self {
        self.relay = Some(relay);
        self
    }

    pub fn build(self, config: &ProtocolConfig) -> VersionMessage {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        VersionMessage {
            version: self.version.unwrap_or(config.protocol_version),
            services: self.services.unwrap_or(Services::NODE_NETWORK),
            timestamp: self.timestamp.unwrap_or(now),
            addr_me: self.addr_me.unwrap_or_default(),
            addr_you: self.addr_you.unwrap_or_default(),
            nonce: self.nonce.unwrap_or_else(util::nonce),
            subversion: self.subversion.unwrap_or_else(|| config.subversion.clone()),
            start_height: self.start_height.unwrap_or(0),
            relay: self.relay.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    /// Encodes a NetAddr field in standard ::ffff: IPv4-mapped form.
    fn net_addr_bytes(services: u64, ip: [u8; 4], port: u16) -> Vec<u8> {
        let mut b = vec![];
        b.extend_from_slice(&services.to_le_bytes());
        b.extend_from_slice(&[0u8; 10]);
        b.extend_from_slice(&[0xFF, 0xFF]);
        b.extend_from_slice(&ip);
        b.extend_from_slice(&port.to_be_bytes());
        b
    }

    /// Hand-built version payload as a real peer would send it, chain label
    /// included.
    fn version_payload(relay_byte: Option<u8>) -> Vec<u8> {
        let mut p = vec![];
        p.extend_from_slice(&70015u32.to_le_bytes());
        p.extend_from_slice(&1033u64.to_le_bytes());
        p.extend_from_slice(&1700000000u64.to_le_bytes());
        p.push(4);
        p.extend_from_slice(b"main");
        p.extend(net_addr_bytes(1033, [192, 168, 1, 1], 8333)); // addr_me
        p.extend(net_addr_bytes(1033, [10, 0, 0, 1], 8333)); // addr_you
        p.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04]); // nonce
        let ua = b"/Satoshi:25.0.0/";
        p.push(ua.len() as u8);
        p.extend_from_slice(ua);
        p.extend_from_slice(&820000u32.to_le_bytes());
        if let Some(b) = relay_byte {
            p.push(b);
        }
        p
    }

    fn sample_message() -> VersionMessage {
        VersionMessage {
            version: 70015,
            services: Services::new(1),
            timestamp: 1700000000,
            addr_me: NetAddr::new(1, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)), 8333),
            addr_you: NetAddr::new(1, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 8333),
            nonce: [1, 2, 3, 4, 5, 6, 7, 8],
            subversion: "/test:1.0/".to_string(),
            start_height: 500000,
            relay: true,
        }
    }

    #[test]
    fn decode_all_fields() {
        let msg = VersionMessage::decode(&version_payload(Some(1))).unwrap();

        assert_eq!(msg.version, 70015);
        assert_eq!(msg.services.bits(), 1033);
        assert_eq!(msg.timestamp, 1700000000);
        assert_eq!(msg.addr_me.ip, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(msg.addr_me.port, 8333);
        assert_eq!(msg.addr_you.ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(msg.nonce, [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(msg.subversion, "/Satoshi:25.0.0/");
        assert_eq!(msg.start_height, 820000);
        assert!(msg.relay);
    }

    #[test]
    fn decode_missing_relay_byte_defaults_true() {
        let msg = VersionMessage::decode(&version_payload(None)).unwrap();
        assert!(msg.relay);
    }

    #[test]
    fn decode_any_nonzero_relay_byte_is_true() {
        assert!(VersionMessage::decode(&version_payload(Some(0x7F))).unwrap().relay);
        assert!(!VersionMessage::decode(&version_payload(Some(0x00))).unwrap().relay);
    }

    #[test]
    fn decode_trailing_byte_is_rejected() {
        let mut payload = version_payload(Some(1));
        payload.push(0xAA);
        assert_eq!(
            VersionMessage::decode(&payload).unwrap_err(),
            CodecError::TrailingBytes(1)
        );
    }

    #[test]
    fn decode_rejects_every_truncation_except_missing_relay() {
        let payload = version_payload(Some(1));

        // cutting off just the relay byte is the one valid prefix
        for cut in 0..payload.len() - 1 {
            assert!(
                VersionMessage::decode(&payload[..cut]).is_err(),
                "prefix of {cut} bytes decoded successfully"
            );
        }
        assert!(VersionMessage::decode(&payload[..payload.len() - 1]).is_ok());
    }

    #[test]
    fn encode_decode_round_trip_field_by_field() {
        let original = sample_message();
        let decoded = VersionMessage::decode(&original.encode()).unwrap();

        // the chain label is transient and the timestamp is truncated to
        // whole seconds on encode; every typed field must survive
        assert_eq!(decoded.version, original.version);
        assert_eq!(decoded.services, original.services);
        assert_eq!(decoded.timestamp, original.timestamp);
        assert_eq!(decoded.addr_me, original.addr_me);
        assert_eq!(decoded.addr_you, original.addr_you);
        assert_eq!(decoded.nonce, original.nonce);
        assert_eq!(decoded.subversion, original.subversion);
        assert_eq!(decoded.start_height, original.start_height);
        assert_eq!(decoded.relay, original.relay);
    }

    #[test]
    fn encode_handshake_scenario() {
        let msg = VersionMessage::builder()
            .version(70015)
            .services(Services::new(1))
            .subversion("/test:1.0/")
            .start_height(500000)
            .build(&ProtocolConfig::default());

        let decoded = VersionMessage::decode(&msg.encode()).unwrap();
        assert_eq!(decoded.start_height, 500000);
        assert_eq!(decoded.subversion, "/test:1.0/");
    }

    #[test]
    fn encode_writes_fixed_main_chain_label() {
        let buf = sample_message().encode();
        // label sits right after version(4) + services(8) + timestamp(8)
        assert_eq!(&buf[20..25], &[0x04, b'm', b'a', b'i', b'n']);
    }

    #[test]
    fn encode_timestamp_upper_half_is_zero() {
        let buf = sample_message().encode();
        assert_eq!(&buf[12..16], &1700000000u32.to_le_bytes());
        assert_eq!(&buf[16..20], &[0u8; 4]);
    }

    #[test]
    fn encode_relay_byte_is_canonical() {
        let mut msg = sample_message();
        assert_eq!(*msg.encode().last().unwrap(), 0x01);
        msg.relay = false;
        assert_eq!(*msg.encode().last().unwrap(), 0x00);
    }

    #[test]
    fn decode_of_decoded_label_variant_still_round_trips() {
        // a peer on a fork may send a label other than "main"; decode
        // discards it and encode normalizes back to the default network
        let mut p = version_payload(Some(1));
        // splice in a longer label
        let mut forked = vec![];
        forked.extend_from_slice(&p[..20]);
        forked.push(7);
        forked.extend_from_slice(b"testnet");
        forked.extend_from_slice(&p[25..]);
        p = forked;

        let msg = VersionMessage::decode(&p).unwrap();
        let reencoded = msg.encode();
        assert_eq!(&reencoded[20..25], &[0x04, b'm', b'a', b'i', b'n']);
    }

    #[test]
    fn builder_applies_documented_defaults() {
        let config = ProtocolConfig::default();
        let msg = VersionMessage::builder().build(&config);

        assert_eq!(msg.version, config.protocol_version);
        assert_eq!(msg.subversion, config.subversion);
        assert_eq!(msg.services, Services::NODE_NETWORK);
        assert_eq!(msg.addr_me, NetAddr::default());
        assert_eq!(msg.addr_you, NetAddr::default());
        assert_eq!(msg.start_height, 0);
        assert!(msg.relay);
        assert!(msg.timestamp > 0);

        // nonces are random per build
        let other = VersionMessage::builder().build(&config);
        assert_ne!(msg.nonce, other.nonce);
    }

    #[test]
    fn services_debug_names_flags() {
        let s = Services::new(1033);
        assert!(s.contains(Services::NODE_NETWORK));
        assert!(s.contains(Services::NODE_WITNESS));
        assert!(s.contains(Services::NODE_NETWORK_LIMITED));
        assert!(!s.contains(Services::NODE_BLOOM));

        let dbg = format!("{:?}", s);
        assert!(dbg.contains("NODE_NETWORK"));
        assert!(dbg.contains("NODE_WITNESS"));
    }

    #[test]
    fn decode_command_rejects_wrong_command() {
        let payload = version_payload(Some(1));
        assert!(VersionMessage::decode_command(Command::Version, &payload).is_ok());
        assert_eq!(
            VersionMessage::decode_command(Command::Block, &payload).unwrap_err(),
            CodecError::TypeMismatch {
                expected: Command::Version,
                got: Command::Block,
            }
        );
    }
}
