use crate::wire::error::CodecError;
use crate::wire::reader::Reader;
use crate::wire::util;
use crate::wire::writer::Writer;
use std::net::IpAddr;

/// The compound network-address record embedded in handshake messages.
///
/// Wire layout (26 bytes):
///
/// ```text
/// 8  bytes  services (u64 LE)
/// 16 bytes  ip (IPv4 addresses in IPv4-mapped-IPv6 form)
/// 2  bytes  port (u16 BE)
/// ```
///
/// The port is the one field in the whole message family that is big-endian
/// on the wire. That asymmetry is a protocol fact, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetAddr {
    pub services: u64,
    pub ip: IpAddr,
    pub port: u16,
}

impl NetAddr {
    pub fn new(services: u64, ip: IpAddr, port: u16) -> Self {
        Self { services, ip, port }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let services = r.read_u64_le("net_addr: services")?;
        let ip = util::ip_from_wire(r.read_array("net_addr: ip")?);
        let port = r.read_u16_be("net_addr: port")?;
        Ok(Self { services, ip, port })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.write_u64_le(self.services);
        w.write_bytes(&util::ip_to_wire(self.ip));
        w.write_u16_be(self.port);
    }
}

impl Default for NetAddr {
    /// The advertise-nothing address: no services, `::`, port 0.
    fn default() -> Self {
        Self {
            services: 0,
            ip: util::unspecified_ip(),
            port: 0,
        }
    }
}
