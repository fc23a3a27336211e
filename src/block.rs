//! Reference block domain type for the `block` message codec.
//!
//! The wire layer is parametric over the block representation (see
//! [`BlockCodec`]); this module supplies a minimally decoded implementation:
//! the 80-byte header is parsed, the transaction count is read, and the
//! serialized transactions are retained as raw bytes so the round trip is
//! lossless without this crate owning a transaction model.

use crate::wire::block::BlockCodec;
use crate::wire::error::CodecError;
use crate::wire::reader::Reader;
use crate::wire::writer::Writer;
use sha2::{Digest, Sha256};

/// A Bitcoin block header (exactly 80 bytes on the wire).
///
/// Layout, little-endian fields:
///
/// ```text
/// 4  bytes  version
/// 32 bytes  previous block hash
/// 32 bytes  merkle root
/// 4  bytes  timestamp (Unix epoch)
/// 4  bytes  nBits (compact target encoding)
/// 4  bytes  nonce
/// ```
///
/// https://developer.bitcoin.org/reference/block_chain.html#block-headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u32,
    pub prev_blockhash: [u8; 32],
    pub merkle_root: [u8; 32],
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub(crate) fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            version: r.read_u32_le("header: version")?,
            prev_blockhash: r.read_array("header: prev_blockhash")?,
            merkle_root: r.read_array("header: merkle_root")?,
            time: r.read_u32_le("header: time")?,
            bits: r.read_u32_le("header: bits")?,
            nonce: r.read_u32_le("header: nonce")?,
        })
    }

    pub(crate) fn encode(&self, w: &mut Writer) {
        w.write_u32_le(self.version);
        w.write_bytes(&self.prev_blockhash);
        w.write_bytes(&self.merkle_root);
        w.write_u32_le(self.time);
        w.write_u32_le(self.bits);
        w.write_u32_le(self.nonce);
    }

    /// Computes the block header hash (block ID): SHA256(SHA256(header)).
    ///
    /// Returned in little-endian byte order, matching the wire
    /// representation; block explorers display the bytes reversed.
    pub fn hash(&self) -> [u8; 32] {
        let mut w = Writer::new();
        self.encode(&mut w);

        let hash = Sha256::digest(Sha256::digest(w.concat()));

        let mut result = [0u8; 32];
        result.copy_from_slice(&hash);
        result
    }
}

/// A minimally decoded block as carried by the P2P `block` message.
///
/// ```text
/// block_header      (80 bytes)
/// txn_count         (CompactSize)
/// transactions[]    (raw serialized transactions)
/// ```
///
/// Transactions are not decoded; their serialized bytes are kept verbatim so
/// [`BlockCodec::to_raw`] reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub tx_count: u64,
    raw_transactions: Vec<u8>,
}

impl Block {
    /// The serialized transaction bytes, undecoded.
    pub fn raw_transactions(&self) -> &[u8] {
        &self.raw_transactions
    }
}

impl BlockCodec for Block {
    fn from_raw(raw: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(raw);
        let header = BlockHeader::decode(&mut r)?;
        let tx_count = r.read_varint("block: txn_count")?;
        let raw_transactions = r.read_fixed(r.remaining(), "block: transactions")?.to_vec();

        Ok(Self {
            header,
            tx_count,
            raw_transactions,
        })
    }

    fn to_raw(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.header.encode(&mut w);
        w.write_varint(self.tx_count);
        w.write_bytes(&self.raw_transactions);
        w.concat()
    }
}
