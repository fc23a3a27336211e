//! Bitcoin P2P wire protocol codecs.
//!
//! This module provides the building blocks every command codec is made of:
//!
//! - [`Reader`] / [`Writer`] — cursor-based decoding and append-only encoding
//!   of the protocol's framing primitives (fixed-width little-endian
//!   integers, the big-endian port, CompactSize varints, length-prefixed
//!   byte strings)
//! - [`Payload`] — the contract every command message implements
//! - [`NetAddr`] — the compound address record embedded in handshakes
//! - [`VersionMessage`] and [`BlockMessage`] — the concrete command codecs
//!
//! All integers on the wire are little-endian except the address port.
//!
//! Protocol reference:
//! https://developer.bitcoin.org/reference/p2p_networking.html

pub mod block;
pub mod constants;
pub mod error;
pub mod message;
pub mod net_addr;
pub mod reader;
pub mod util;
pub mod version;
pub mod writer;

pub use block::{BlockCodec, BlockMessage};
pub use error::CodecError;
pub use message::{Command, Payload};
pub use net_addr::NetAddr;
pub use reader::Reader;
pub use version::{ProtocolConfig, Services, VersionBuilder, VersionMessage};
pub use writer::Writer;
