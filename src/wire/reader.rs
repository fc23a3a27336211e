use crate::wire::error::CodecError;

/// Cursor-based decoder over an immutable payload buffer.
///
/// Wraps a byte slice and a position starting at 0. All multi-byte integers
/// are little-endian except [`Reader::read_u16_be`], which exists solely for
/// the port field of a network address.
///
/// Every method takes a `ctx` label naming the field being read; it is
/// carried into the error so a failed decode says which field the buffer ran
/// out under.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True iff the cursor has consumed the entire buffer.
    pub fn finished(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Asserts the buffer is fully consumed.
    ///
    /// Every command codec calls this as the last step of its decode;
    /// unaccounted trailing bytes fail with [`CodecError::TrailingBytes`].
    pub fn check_finished(&self) -> Result<(), CodecError> {
        if self.finished() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.remaining()))
        }
    }

    /// Reads exactly `n` bytes, advancing the cursor.
    pub fn read_fixed(&mut self, n: usize, ctx: &'static str) -> Result<&'a [u8], CodecError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + n)
            .ok_or(CodecError::TruncatedBuffer(ctx))?;
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self, ctx: &'static str) -> Result<[u8; N], CodecError> {
        let bytes = self.read_fixed(N, ctx)?;
        // read_fixed returned exactly N bytes
        Ok(bytes.try_into().unwrap())
    }

    pub fn read_u8(&mut self, ctx: &'static str) -> Result<u8, CodecError> {
        let b = *self.buf.get(self.pos).ok_or(CodecError::TruncatedBuffer(ctx))?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16_le(&mut self, ctx: &'static str) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array(ctx)?))
    }

    /// Big-endian u16. Used only for the port field of a network address,
    /// the one integer in the message family not encoded little-endian.
    pub fn read_u16_be(&mut self, ctx: &'static str) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.read_array(ctx)?))
    }

    pub fn read_u32_le(&mut self, ctx: &'static str) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array(ctx)?))
    }

    pub fn read_u64_le(&mut self, ctx: &'static str) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array(ctx)?))
    }

    /// Reads a Bitcoin CompactSize varint.
    ///
    /// A first byte below 0xFD is the value itself; 0xFD, 0xFE and 0xFF
    /// prefix a little-endian u16, u32 and u64 respectively. A prefix whose
    /// extension bytes do not fit the remaining buffer fails with
    /// [`CodecError::MalformedLength`].
    pub fn read_varint(&mut self, ctx: &'static str) -> Result<u64, CodecError> {
        let first = self.read_u8(ctx)?;
        match first {
            0xFD => {
                let b = self.read_ext::<2>(ctx)?;
                Ok(u16::from_le_bytes(b) as u64)
            }
            0xFE => {
                let b = self.read_ext::<4>(ctx)?;
                Ok(u32::from_le_bytes(b) as u64)
            }
            0xFF => {
                let b = self.read_ext::<8>(ctx)?;
                Ok(u64::from_le_bytes(b))
            }
            n => Ok(n as u64),
        }
    }

    /// Reads a varint length `n` followed by exactly `n` bytes.
    pub fn read_var_bytes(&mut self, ctx: &'static str) -> Result<&'a [u8], CodecError> {
        let n = self.read_varint(ctx)?;
        if n > self.remaining() as u64 {
            return Err(CodecError::TruncatedBuffer(ctx));
        }
        self.read_fixed(n as usize, ctx)
    }

    /// Varint extension bytes; a short buffer here means the length prefix
    /// itself lied about what follows.
    fn read_ext<const N: usize>(&mut self, ctx: &'static str) -> Result<[u8; N], CodecError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + N)
            .ok_or(CodecError::MalformedLength(ctx))?;
        self.pos += N;
        // the slice is exactly N bytes
        Ok(bytes.try_into().unwrap())
    }
}
