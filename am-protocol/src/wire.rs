//! Modem bridge wire format
//!
//! The modem pushes system notifications through the RIL bridge as raw frames:
//!
//! ```text
//! 10 00 AA BB 27 01 03 XX YY YY YY YY ZZ ZZ ZZ ZZ
//! ^^^^^ ^^^^^ ^^ ^^ ^^ ^^ ^^^^^^^^^^^ ^^^^^^^^^^^
//! len   unused |  |  |  rat  band        channel
//!              |  |  notification command (0x03)
//!              |  sub command (0x01 = CP channel info)
//!              main command (0x27 = system)
//! ```
//!
//! The bridge strips the 7 byte header and hands subscribers a message of
//! `{dev_id = sub command, data_len, data}`. All multi-byte fields are little endian.

use am_error::{AdaptiveMipiError, Result};
use serde::{Deserialize, Serialize};

/// Main command byte for system notifications
pub const IPC_MAIN_CMD_SYSTEM: u8 = 0x27;

/// Sub command (and bridge `dev_id`) for CP channel info notifications
pub const IPC_SYSTEM_CP_CHANNEL_INFO: u32 = 0x01;

/// Notification command byte
pub const IPC_NOTI_CMD: u8 = 0x03;

/// Size of the frame header preceding the payload
pub const IPC_HEADER_LEN: usize = 7;

/// Last radio channel reported by the modem
///
/// The all-zero value means "no known RF state".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RadioChannelDescriptor {
    pub rat: u8,
    pub band: u32,
    pub channel: u32,
}

impl RadioChannelDescriptor {
    /// Packed record size on the wire: `u8 rat, u32 band, u32 channel`
    pub const RECORD_SIZE: usize = 9;

    pub const fn new(rat: u8, band: u32, channel: u32) -> Self {
        Self { rat, band, channel }
    }

    /// True for the zero descriptor
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }

    /// Decode a packed record. The slice must be exactly `RECORD_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record: &[u8; Self::RECORD_SIZE] =
            bytes.try_into().map_err(|_| AdaptiveMipiError::PayloadSize {
                expected: Self::RECORD_SIZE,
                actual: bytes.len(),
            })?;

        Ok(Self {
            rat: record[0],
            band: u32::from_le_bytes([record[1], record[2], record[3], record[4]]),
            channel: u32::from_le_bytes([record[5], record[6], record[7], record[8]]),
        })
    }

    /// Encode into the packed record layout
    pub fn to_bytes(&self) -> [u8; Self::RECORD_SIZE] {
        let mut out = [0u8; Self::RECORD_SIZE];
        out[0] = self.rat;
        out[1..5].copy_from_slice(&self.band.to_le_bytes());
        out[5..9].copy_from_slice(&self.channel.to_le_bytes());
        out
    }
}

impl std::fmt::Display for RadioChannelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{},{}]", self.rat, self.band, self.channel)
    }
}

/// Message delivered to bridge subscribers
///
/// `data_len` is the length claimed by the sender. Subscribers must check it
/// against the record they expect before touching `data`.
#[derive(Debug, Clone, Copy)]
pub struct RilBridgeMessage<'a> {
    pub dev_id: u32,
    pub data_len: u32,
    pub data: &'a [u8],
}

impl<'a> RilBridgeMessage<'a> {
    /// Build a message whose claimed length matches the buffer
    pub fn new(dev_id: u32, data: &'a [u8]) -> Self {
        Self {
            dev_id,
            data_len: data.len() as u32,
            data,
        }
    }

    /// Size of the message as seen by the bridge (header fields plus payload)
    pub fn size(&self) -> usize {
        2 * std::mem::size_of::<u32>() + self.data.len()
    }

    /// Decode the payload as CP channel info.
    ///
    /// Returns `None` when the tag or the claimed length doesn't match, or when
    /// the buffer is shorter than the claimed length.
    pub fn cp_channel_info(&self) -> Option<RadioChannelDescriptor> {
        if self.dev_id != IPC_SYSTEM_CP_CHANNEL_INFO {
            return None;
        }
        if self.data_len as usize != RadioChannelDescriptor::RECORD_SIZE {
            return None;
        }
        let record = self.data.get(..RadioChannelDescriptor::RECORD_SIZE)?;
        RadioChannelDescriptor::from_bytes(record).ok()
    }
}

/// A raw frame as produced by the modem, before the bridge strips the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpcFrame<'a> {
    pub main_cmd: u8,
    pub sub_cmd: u8,
    pub noti_cmd: u8,
    pub payload: &'a [u8],
}

impl<'a> IpcFrame<'a> {
    /// Parse a complete frame. The declared length must cover the whole buffer.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < IPC_HEADER_LEN {
            return Err(AdaptiveMipiError::FrameTooShort {
                actual: bytes.len(),
                min: IPC_HEADER_LEN,
            });
        }

        let declared = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        if declared != bytes.len() {
            return Err(AdaptiveMipiError::FrameLengthMismatch {
                declared,
                actual: bytes.len(),
            });
        }

        let main_cmd = bytes[4];
        if main_cmd != IPC_MAIN_CMD_SYSTEM {
            return Err(AdaptiveMipiError::UnexpectedCommand {
                expected: IPC_MAIN_CMD_SYSTEM,
                found: main_cmd,
            });
        }

        let noti_cmd = bytes[6];
        if noti_cmd != IPC_NOTI_CMD {
            return Err(AdaptiveMipiError::UnexpectedCommand {
                expected: IPC_NOTI_CMD,
                found: noti_cmd,
            });
        }

        Ok(Self {
            main_cmd,
            sub_cmd: bytes[5],
            noti_cmd,
            payload: &bytes[IPC_HEADER_LEN..],
        })
    }

    /// View the frame the way the bridge hands it to subscribers
    pub fn to_bridge_message(&self) -> RilBridgeMessage<'a> {
        RilBridgeMessage::new(u32::from(self.sub_cmd), self.payload)
    }
}

/// Build a complete CP channel info frame for a descriptor
pub fn encode_cp_channel_frame(descriptor: &RadioChannelDescriptor) -> Vec<u8> {
    let total = IPC_HEADER_LEN + RadioChannelDescriptor::RECORD_SIZE;
    let mut frame = Vec::with_capacity(total);
    frame.extend_from_slice(&(total as u16).to_le_bytes());
    frame.extend_from_slice(&[0, 0]);
    frame.push(IPC_MAIN_CMD_SYSTEM);
    frame.push(IPC_SYSTEM_CP_CHANNEL_INFO as u8);
    frame.push(IPC_NOTI_CMD);
    frame.extend_from_slice(&descriptor.to_bytes());
    frame
}

/// Parse a hex dump such as `"10 00 AA BB 27 01 03"` or `"1000aabb270103"`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b',')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(AdaptiveMipiError::InvalidHex(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair)
                .map_err(|_| AdaptiveMipiError::InvalidHex("non-ASCII input".into()))?;
            u8::from_str_radix(text, 16)
                .map_err(|_| AdaptiveMipiError::InvalidHex(format!("bad byte '{}'", text)))
        })
        .collect()
}

/// Format bytes as an uppercase, space separated hex dump
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_documented_frame() {
        let bytes = parse_hex("10 00 AA BB 27 01 03 03 07 00 00 00 2C 01 00 00").unwrap();
        let frame = IpcFrame::parse(&bytes).unwrap();
        assert_eq!(frame.sub_cmd, 0x01);

        let msg = frame.to_bridge_message();
        assert_eq!(msg.dev_id, IPC_SYSTEM_CP_CHANNEL_INFO);
        assert_eq!(msg.data_len, 9);
        assert_eq!(
            msg.cp_channel_info(),
            Some(RadioChannelDescriptor::new(3, 7, 300))
        );
    }

    #[test]
    fn test_frame_length_must_match() {
        let bytes = parse_hex("11 00 AA BB 27 01 03 03 07 00 00 00 2C 01 00 00").unwrap();
        assert!(matches!(
            IpcFrame::parse(&bytes),
            Err(AdaptiveMipiError::FrameLengthMismatch { declared: 17, actual: 16 })
        ));
    }

    #[test]
    fn test_frame_rejects_other_main_command() {
        let bytes = parse_hex("07 00 00 00 28 01 03").unwrap();
        assert!(matches!(
            IpcFrame::parse(&bytes),
            Err(AdaptiveMipiError::UnexpectedCommand { expected: 0x27, found: 0x28 })
        ));
    }

    #[test]
    fn test_short_frame() {
        assert!(matches!(
            IpcFrame::parse(&[0x03, 0x00, 0x00]),
            Err(AdaptiveMipiError::FrameTooShort { actual: 3, min: 7 })
        ));
    }

    #[test]
    fn test_claimed_length_one_short_is_ignored() {
        let record = RadioChannelDescriptor::new(1, 5, 250).to_bytes();
        let msg = RilBridgeMessage {
            dev_id: IPC_SYSTEM_CP_CHANNEL_INFO,
            data_len: (RadioChannelDescriptor::RECORD_SIZE - 1) as u32,
            data: &record,
        };
        assert_eq!(msg.cp_channel_info(), None);
    }

    #[test]
    fn test_claimed_length_longer_than_buffer() {
        let record = [0u8; 4];
        let msg = RilBridgeMessage {
            dev_id: IPC_SYSTEM_CP_CHANNEL_INFO,
            data_len: RadioChannelDescriptor::RECORD_SIZE as u32,
            data: &record,
        };
        assert_eq!(msg.cp_channel_info(), None);
    }

    #[test]
    fn test_other_dev_id_is_ignored() {
        let record = RadioChannelDescriptor::new(1, 5, 250).to_bytes();
        let msg = RilBridgeMessage::new(0x02, &record);
        assert_eq!(msg.cp_channel_info(), None);
    }

    #[test]
    fn test_encoded_frame_parses_back() {
        let descriptor = RadioChannelDescriptor::new(7, 78, 636_666);
        let frame = encode_cp_channel_frame(&descriptor);
        assert_eq!(frame.len(), 16);
        assert_eq!(frame[0], 0x10);

        let parsed = IpcFrame::parse(&frame).unwrap();
        assert_eq!(parsed.to_bridge_message().cp_channel_info(), Some(descriptor));
    }

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(parse_hex("0a0B").unwrap(), vec![0x0A, 0x0B]);
        assert_eq!(parse_hex("0a:0b, ff").unwrap(), vec![0x0A, 0x0B, 0xFF]);
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
        assert_eq!(to_hex(&[0x10, 0x00, 0x27]), "10 00 27");
    }
}
