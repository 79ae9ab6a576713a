//! HCI SCO data packets
//!
//! ```text
//!  0        12   14   16        24
//!  | handle | PS | RFU | length | data ...
//! ```

use super::constants::*;
use super::types::ScoDataStatus;
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Errors produced while decoding or encoding SCO packets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoPacketError {
    #[error("SCO packet too short: {0} bytes")]
    TooShort(usize),

    #[error("SCO packet declares {declared} data bytes, {available} present")]
    LengthMismatch { declared: usize, available: usize },

    #[error("SCO payload of {0} bytes does not fit one packet")]
    PayloadTooLarge(usize),
}

/// One HCI SCO data packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoPacket {
    pub handle: u16,
    pub status: ScoDataStatus,
    pub data: Vec<u8>,
}

impl ScoPacket {
    pub fn new(handle: u16, status: ScoDataStatus, data: Vec<u8>) -> Self {
        Self {
            handle: handle & SCO_HANDLE_MASK,
            status,
            data,
        }
    }

    /// Parse from raw packet (without the H4 packet type indicator)
    pub fn parse(raw: &[u8]) -> Result<Self, ScoPacketError> {
        if raw.len() < HCI_SCO_HEADER_SIZE {
            return Err(ScoPacketError::TooShort(raw.len()));
        }

        let header = LittleEndian::read_u16(&raw[0..2]);
        let declared = raw[2] as usize;
        let payload = &raw[HCI_SCO_HEADER_SIZE..];
        if payload.len() < declared {
            return Err(ScoPacketError::LengthMismatch {
                declared,
                available: payload.len(),
            });
        }

        let flag = ((header >> SCO_PACKET_STATUS_SHIFT) & SCO_PACKET_STATUS_MASK) as u8;

        Ok(Self {
            handle: header & SCO_HANDLE_MASK,
            status: ScoDataStatus::from_wire(flag),
            data: payload[..declared].to_vec(),
        })
    }

    /// Serialize to raw packet
    pub fn serialize(&self) -> Result<Vec<u8>, ScoPacketError> {
        let length = u8::try_from(self.data.len())
            .map_err(|_| ScoPacketError::PayloadTooLarge(self.data.len()))?;

        let mut header = [0u8; 2];
        LittleEndian::write_u16(
            &mut header,
            (self.handle & SCO_HANDLE_MASK)
                | ((self.status.to_wire() as u16) << SCO_PACKET_STATUS_SHIFT),
        );

        let mut packet = Vec::with_capacity(HCI_SCO_HEADER_SIZE + self.data.len());
        packet.extend_from_slice(&header);
        packet.push(length);
        packet.extend_from_slice(&self.data);

        Ok(packet)
    }
}
