/// Default P2P protocol version advertised in outbound `version` messages.
///
/// Sent during handshake and used for peer capability negotiation. Notable
/// versions are listed at:
/// https://developer.bitcoin.org/reference/p2p_networking.html#protocol-versions
///
/// Serialized on the wire as a 32-bit little-endian integer.
pub const PROTOCOL_VERSION: u32 = 70015;

/// Default client subversion (user agent) advertised in outbound `version`
/// messages, in the conventional `/name:version/` form (BIP 14).
pub const SUBVERSION: &str = "/btc-wire:0.1.0/";

/// Chain/branch label written into the handshake payload on encode.
///
/// Encode always emits this fixed 4-byte ASCII literal for the default
/// network; decode accepts (and discards) a variable-length label. See
/// [`VersionMessage`] for why the asymmetry is kept.
///
/// [`VersionMessage`]: crate::wire::version::VersionMessage
pub const NETWORK_LABEL: &[u8; 4] = b"main";
