/// Append-only byte sink producing the exact mirror encoding of [`Reader`].
///
/// Same endianness rules (little-endian everywhere except the big-endian
/// port) and always the minimal varint width for a given value, since the
/// canonical wire format requires it. Writing is total over valid typed
/// input; there are no encode-side error conditions.
///
/// [`Reader`]: crate::wire::reader::Reader
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated byte sequence.
    pub fn concat(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16_le(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Big-endian u16; used only for the network-address port.
    pub fn write_u16_be(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Writes a Bitcoin CompactSize varint in its minimal width.
    pub fn write_varint(&mut self, value: u64) {
        match value {
            0..=0xFC => self.buf.push(value as u8),
            0xFD..=0xFFFF => {
                self.buf.push(0xFD);
                self.buf.extend_from_slice(&(value as u16).to_le_bytes());
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.buf.push(0xFE);
                self.buf.extend_from_slice(&(value as u32).to_le_bytes());
            }
            _ => {
                self.buf.push(0xFF);
                self.buf.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    /// Writes a varint length prefix followed by the bytes themselves.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::reader::Reader;

    #[test]
    fn write_varint_uses_minimal_width() {
        let cases: &[(u64, Vec<u8>)] = &[
            (0, vec![0x00]),
            (5, vec![0x05]),
            (0xFC, vec![0xFC]),
            (0xFD, vec![0xFD, 0xFD, 0x00]),
            (0xFFFF, vec![0xFD, 0xFF, 0xFF]),
            (0x1_0000, vec![0xFE, 0x00, 0x00, 0x01, 0x00]),
            (0xFFFF_FFFF, vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF]),
            (0x1_0000_0000, vec![0xFF, 0, 0, 0, 0, 1, 0, 0, 0]),
        ];

        for (value, expected) in cases {
            let mut w = Writer::new();
            w.write_varint(*value);
            assert_eq!(&w.concat(), expected, "varint encoding of {value}");
        }
    }

    #[test]
    fn write_u16_be_mirrors_reader() {
        let mut w = Writer::new();
        w.write_u16_be(80);
        assert_eq!(w.concat(), vec![0x00, 0x50]);
    }

    #[test]
    fn write_var_bytes_round_trips() {
        let mut w = Writer::new();
        w.write_var_bytes(b"/test:1.0/");
        let buf = w.concat();

        let mut r = Reader::new(&buf);
        assert_eq!(r.read_var_bytes("s").unwrap(), b"/test:1.0/");
        assert!(r.finished());
    }

    #[test]
    fn integers_round_trip_through_reader() {
        let mut w = Writer::new();
        w.write_u8(0xAB);
        w.write_u16_le(0xBEEF);
        w.write_u32_le(70015);
        w.write_u64_le(0x1234567890abcdef);
        let buf = w.concat();

        let mut r = Reader::new(&buf);
        assert_eq!(r.read_u8("a").unwrap(), 0xAB);
        assert_eq!(r.read_u16_le("b").unwrap(), 0xBEEF);
        assert_eq!(r.read_u32_le("c").unwrap(), 70015);
        assert_eq!(r.read_u64_le("d").unwrap(), 0x1234567890abcdef);
        assert!(r.check_finished().is_ok());
    }
}
