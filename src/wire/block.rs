use crate::wire::error::CodecError;
use crate::wire::message::{Command, Payload};

/// Contract a block domain type must satisfy to ride in a [`BlockMessage`].
///
/// The wire layer treats blocks as opaque: it never inspects headers,
/// transactions or consensus rules. Any type that can reconstruct itself
/// from its raw serialization (and produce it back, losslessly) can be
/// carried. The concrete type is supplied by the embedding application —
/// [`crate::block::Block`] is the reference implementation.
pub trait BlockCodec: Sized {
    /// Constructs the block from its raw serialized bytes.
    fn from_raw(raw: &[u8]) -> Result<Self, CodecError>;

    /// Serializes the block back to its raw byte form.
    fn to_raw(&self) -> Vec<u8>;
}

/// The block-propagation message.
///
/// The payload of a `block` message is exactly the block's own
/// serialization, so this codec has no framing logic of its own: encode and
/// decode delegate entirely to the injected block type. It exists to show
/// that the [`Payload`] contract composes with arbitrarily large,
/// externally-owned payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMessage<B> {
    block: B,
}

impl<B: BlockCodec> BlockMessage<B> {
    pub fn new(block: B) -> Self {
        Self { block }
    }

    pub fn block(&self) -> &B {
        &self.block
    }

    pub fn into_block(self) -> B {
        self.block
    }
}

impl<B: BlockCodec> Payload for BlockMessage<B> {
    const COMMAND: Command = Command::Block;

    fn encode(&self) -> Vec<u8> {
        self.block.to_raw()
    }

    fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            block: B::from_raw(payload)?,
        })
    }
}
