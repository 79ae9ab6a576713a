//! Type definitions for the SCO audio path
use super::constants::*;
use std::fmt;
use thiserror::Error;

/// Errors reported by an audio backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("Audio buffers exhausted")]
    Exhausted,

    #[error("Audio backend disconnected")]
    Disconnected,

    #[error("Audio backend error: {0}")]
    Backend(String),
}

/// Validity of the samples in an audio frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoDataStatus {
    /// Correctly received or locally produced audio
    Valid,
    /// Some of the samples were lost or may be invalid
    PartiallyLost,
    /// Every sample of the interval was lost
    FullyLost,
    /// Nothing to carry for this interval
    NoData,
}

impl ScoDataStatus {
    /// Map the HCI packet status flag. "Possibly invalid" is reported as
    /// partially lost.
    pub fn from_wire(flag: u8) -> Self {
        match flag & SCO_PACKET_STATUS_MASK as u8 {
            SCO_PACKET_STATUS_CORRECT => ScoDataStatus::Valid,
            SCO_PACKET_STATUS_NO_DATA => ScoDataStatus::FullyLost,
            _ => ScoDataStatus::PartiallyLost,
        }
    }

    pub fn to_wire(&self) -> u8 {
        match self {
            ScoDataStatus::Valid => SCO_PACKET_STATUS_CORRECT,
            ScoDataStatus::PartiallyLost => SCO_PACKET_STATUS_PARTIALLY_LOST,
            ScoDataStatus::FullyLost | ScoDataStatus::NoData => SCO_PACKET_STATUS_NO_DATA,
        }
    }

    /// Frames with this status carry no usable samples
    pub fn is_lost(&self) -> bool {
        matches!(self, ScoDataStatus::FullyLost | ScoDataStatus::NoData)
    }
}

/// Identifies one open session; frames are stamped with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(pub(crate) u64);

impl SessionToken {
    /// Token of frames produced while no session was open
    pub const NONE: SessionToken = SessionToken(0);
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parameters of the active synchronous connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoSession {
    /// Connection handle (12 bits)
    pub handle: u16,
    /// Upper bound on every frame's length
    pub packet_size: u8,
    /// Connection event that opened the session
    pub event: u16,
    pub token: SessionToken,
}

/// A buffer of audio samples moving between the link and the backend.
///
/// Frames are moved, never shared: whoever holds one owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    data: Vec<u8>,
    status: ScoDataStatus,
    session: SessionToken,
}

impl AudioFrame {
    pub fn new(data: Vec<u8>, status: ScoDataStatus, session: SessionToken) -> Self {
        Self {
            data,
            status,
            session,
        }
    }

    /// Zero-length frame used whenever there is nothing to send
    pub fn empty(session: SessionToken) -> Self {
        Self {
            data: Vec::new(),
            status: ScoDataStatus::NoData,
            session,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn status(&self) -> ScoDataStatus {
        self.status
    }

    /// Session the frame belongs to
    pub fn session(&self) -> SessionToken {
        self.session
    }
}
