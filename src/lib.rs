//! Typed codecs for the Bitcoin-style P2P wire protocol message layer.
//!
//! This crate represents protocol messages as typed values and provides
//! lossless, deterministic serialization to and from the exact byte layout
//! peers exchange on the wire. It covers the codec framework (primitive
//! reader/writer, the per-command payload contract, the network-address
//! record) plus the two commands that exercise every framing primitive:
//!
//! - `version` — the connection handshake ([`wire::VersionMessage`])
//! - `block` — block propagation via delegation to an externally supplied
//!   block type ([`wire::BlockMessage`])
//!
//! The codec layer is stateless and synchronous: each encode/decode call
//! operates on a single caller-owned buffer, performs no I/O, and either
//! completes or fails with a typed [`wire::CodecError`]. Transport framing
//! (magic, checksum, the 24-byte outer header), socket handling and message
//! dispatch live above this crate.
//!
//! Protocol reference:
//! https://developer.bitcoin.org/reference/p2p_networking.html

pub mod block;
pub mod wire;
