use crate::wire::error::CodecError;

/// Identifier of a P2P command this crate has a codec for.
///
/// On the wire the command travels as an ASCII string padded with zero bytes
/// to 12 bytes inside the outer message frame. Frame handling itself lives in
/// the transport layer; the codec only needs the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Version,
    Block,
    Unknown,
}

impl Command {
    /// Returns the 12-byte command field as defined by the Bitcoin P2P
    /// protocol: ASCII, padded with zero bytes.
    pub fn as_bytes(&self) -> [u8; 12] {
        let name: &[u8] = match self {
            Command::Version => b"version",
            Command::Block => b"block",
            Command::Unknown => b"",
        };

        let mut padded = [0u8; 12];
        padded[..name.len()].copy_from_slice(name);
        padded
    }
}

impl From<&[u8; 12]> for Command {
    fn from(bytes: &[u8; 12]) -> Self {
        let cmd = std::str::from_utf8(bytes)
            .unwrap_or("")
            .trim_matches(char::from(0));

        match cmd {
            "version" => Command::Version,
            "block" => Command::Block,
            _ => Command::Unknown,
        }
    }
}

/// Implemented by every command message: an identity plus lossless
/// conversion to and from its raw payload bytes.
///
/// The transport layer strips the outer frame (magic, command field, length,
/// checksum) and hands this crate the bare payload together with the command
/// it was framed under; the matching implementor turns it into a typed value.
/// Encoding mirrors that path.
///
/// Decoding either fully populates the value or fails with a typed error;
/// implementors must end their decode with [`Reader::check_finished`] so
/// trailing bytes are rejected rather than silently ignored.
///
/// [`Reader::check_finished`]: crate::wire::reader::Reader::check_finished
pub trait Payload: Sized {
    const COMMAND: Command;

    /// Serializes the message to its canonical payload bytes.
    fn encode(&self) -> Vec<u8>;

    /// Decodes a raw payload buffer into a typed message.
    fn decode(payload: &[u8]) -> Result<Self, CodecError>;

    /// Decode entry point for callers holding a `(command, payload)` pair:
    /// verifies the command actually selects this codec before decoding.
    fn decode_command(command: Command, payload: &[u8]) -> Result<Self, CodecError> {
        if command != Self::COMMAND {
            return Err(CodecError::TypeMismatch {
                expected: Self::COMMAND,
                got: command,
            });
        }
        Self::decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_field_is_zero_padded_ascii() {
        let bytes = Command::Version.as_bytes();
        assert_eq!(&bytes[..7], b"version");
        assert_eq!(&bytes[7..], &[0u8; 5]);

        assert_eq!(Command::from(&bytes), Command::Version);
        assert_eq!(Command::from(&Command::Block.as_bytes()), Command::Block);
    }

    #[test]
    fn unrecognised_command_maps_to_unknown() {
        let mut field = [0u8; 12];
        field[..10].copy_from_slice(b"wtfmessage");
        assert_eq!(Command::from(&field), Command::Unknown);
    }
}
