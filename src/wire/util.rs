use rand::Rng;
use std::net::{IpAddr, Ipv6Addr};

/// Generates a random 8-byte nonce for an outbound handshake.
///
/// The nonce lets a node detect a connection to itself: if a peer echoes our
/// own nonce back in its `version` message, both ends are the same process.
pub fn nonce() -> [u8; 8] {
    rand::thread_rng().gen()
}

/// Interprets the 16-byte wire form of an address.
///
/// The protocol carries every address as 16 bytes; IPv4 addresses travel in
/// IPv4-mapped-IPv6 form (`::ffff:a.b.c.d`) and are unmapped here so callers
/// see a plain [`IpAddr::V4`].
pub fn ip_from_wire(bytes: [u8; 16]) -> IpAddr {
    let v6 = Ipv6Addr::from(bytes);
    match v6.to_ipv4_mapped() {
        Some(v4) => IpAddr::V4(v4),
        None => IpAddr::V6(v6),
    }
}

/// Produces the 16-byte wire form of an address, mapping IPv4 into
/// `::ffff:a.b.c.d`.
pub fn ip_to_wire(ip: IpAddr) -> [u8; 16] {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}

/// The zero address (`::`), used when a node does not know or does not care
/// to advertise an endpoint.
pub fn unspecified_ip() -> IpAddr {
    IpAddr::V6(Ipv6Addr::UNSPECIFIED)
}
