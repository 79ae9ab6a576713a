//! Constants for SCO audio transport

/// Largest SCO data payload carried in one HCI packet
pub const SCO_DATA_SIZE_MAX: u8 = 240;

/// HCI SCO data packet header: handle/flags (2 octets) and length (1 octet)
pub const HCI_SCO_HEADER_SIZE: usize = 3;

/// Connection handles are 12 bits wide
pub const SCO_HANDLE_MASK: u16 = 0x0FFF;

// Packet status flag, bits 12-13 of the handle field
pub const SCO_PACKET_STATUS_SHIFT: u16 = 12;
pub const SCO_PACKET_STATUS_MASK: u16 = 0x03;

pub const SCO_PACKET_STATUS_CORRECT: u8 = 0x00;
pub const SCO_PACKET_STATUS_POSSIBLY_INVALID: u8 = 0x01;
pub const SCO_PACKET_STATUS_NO_DATA: u8 = 0x02;
pub const SCO_PACKET_STATUS_PARTIALLY_LOST: u8 = 0x03;
