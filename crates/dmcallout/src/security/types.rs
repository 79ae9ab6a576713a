//! Type definitions for pairing capability exchange
use super::constants::*;
use bitflags::bitflags;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// IO Capability types for pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoCapability {
    /// Display only capability
    DisplayOnly,
    /// Display with yes/no capability
    DisplayYesNo,
    /// Keyboard only
    KeyboardOnly,
    /// No input, no output
    NoInputNoOutput,
    /// Both keyboard and display (LE only)
    KeyboardDisplay,
}

impl IoCapability {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            IoCapability::DisplayOnly => IO_CAPABILITY_DISPLAY_ONLY,
            IoCapability::DisplayYesNo => IO_CAPABILITY_DISPLAY_YES_NO,
            IoCapability::KeyboardOnly => IO_CAPABILITY_KEYBOARD_ONLY,
            IoCapability::NoInputNoOutput => IO_CAPABILITY_NO_INPUT_NO_OUTPUT,
            IoCapability::KeyboardDisplay => IO_CAPABILITY_KEYBOARD_DISPLAY,
        }
    }

    /// Convert from u8 value from protocol
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            IO_CAPABILITY_DISPLAY_ONLY => Some(IoCapability::DisplayOnly),
            IO_CAPABILITY_DISPLAY_YES_NO => Some(IoCapability::DisplayYesNo),
            IO_CAPABILITY_KEYBOARD_ONLY => Some(IoCapability::KeyboardOnly),
            IO_CAPABILITY_NO_INPUT_NO_OUTPUT => Some(IoCapability::NoInputNoOutput),
            IO_CAPABILITY_KEYBOARD_DISPLAY => Some(IoCapability::KeyboardDisplay),
            _ => None,
        }
    }

    /// Whether the value may be sent in a classic SSP IO capability reply
    pub fn is_valid_classic(&self) -> bool {
        !matches!(self, IoCapability::KeyboardDisplay)
    }
}

impl fmt::Display for IoCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoCapability::DisplayOnly => write!(f, "Display Only"),
            IoCapability::DisplayYesNo => write!(f, "Display Yes/No"),
            IoCapability::KeyboardOnly => write!(f, "Keyboard Only"),
            IoCapability::NoInputNoOutput => write!(f, "No Input No Output"),
            IoCapability::KeyboardDisplay => write!(f, "Keyboard Display"),
        }
    }
}

/// Whether out-of-band authentication data is on hand for a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OobAvailability {
    #[default]
    NotPresent,
    Present,
}

impl OobAvailability {
    pub fn is_present(&self) -> bool {
        matches!(self, OobAvailability::Present)
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            OobAvailability::NotPresent => OOB_DATA_NOT_PRESENT,
            OobAvailability::Present => OOB_DATA_PRESENT,
        }
    }

    /// Any non-zero value from a peer counts as present
    pub fn from_u8(value: u8) -> Self {
        (value != OOB_DATA_NOT_PRESENT).into()
    }
}

impl From<bool> for OobAvailability {
    fn from(present: bool) -> Self {
        if present {
            OobAvailability::Present
        } else {
            OobAvailability::NotPresent
        }
    }
}

/// Bonding class requested in a classic IO capability exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bonding {
    NoBonding,
    Dedicated,
    General,
}

/// Classic SSP authentication requirement.
///
/// The six values are exactly the ones HCI carries in an IO capability
/// request reply, so the type cannot express a combination the controller
/// would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassicAuthRequirement {
    MitmNotRequiredNoBonding,
    MitmRequiredNoBonding,
    MitmNotRequiredDedicatedBonding,
    MitmRequiredDedicatedBonding,
    MitmNotRequiredGeneralBonding,
    MitmRequiredGeneralBonding,
}

impl ClassicAuthRequirement {
    pub fn new(bonding: Bonding, mitm: bool) -> Self {
        match (bonding, mitm) {
            (Bonding::NoBonding, false) => ClassicAuthRequirement::MitmNotRequiredNoBonding,
            (Bonding::NoBonding, true) => ClassicAuthRequirement::MitmRequiredNoBonding,
            (Bonding::Dedicated, false) => ClassicAuthRequirement::MitmNotRequiredDedicatedBonding,
            (Bonding::Dedicated, true) => ClassicAuthRequirement::MitmRequiredDedicatedBonding,
            (Bonding::General, false) => ClassicAuthRequirement::MitmNotRequiredGeneralBonding,
            (Bonding::General, true) => ClassicAuthRequirement::MitmRequiredGeneralBonding,
        }
    }

    pub fn requires_mitm(&self) -> bool {
        matches!(
            self,
            ClassicAuthRequirement::MitmRequiredNoBonding
                | ClassicAuthRequirement::MitmRequiredDedicatedBonding
                | ClassicAuthRequirement::MitmRequiredGeneralBonding
        )
    }

    pub fn bonding(&self) -> Bonding {
        match self {
            ClassicAuthRequirement::MitmNotRequiredNoBonding
            | ClassicAuthRequirement::MitmRequiredNoBonding => Bonding::NoBonding,
            ClassicAuthRequirement::MitmNotRequiredDedicatedBonding
            | ClassicAuthRequirement::MitmRequiredDedicatedBonding => Bonding::Dedicated,
            ClassicAuthRequirement::MitmNotRequiredGeneralBonding
            | ClassicAuthRequirement::MitmRequiredGeneralBonding => Bonding::General,
        }
    }

    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            ClassicAuthRequirement::MitmNotRequiredNoBonding => {
                AUTH_REQ_MITM_NOT_REQUIRED_NO_BONDING
            }
            ClassicAuthRequirement::MitmRequiredNoBonding => AUTH_REQ_MITM_REQUIRED_NO_BONDING,
            ClassicAuthRequirement::MitmNotRequiredDedicatedBonding => {
                AUTH_REQ_MITM_NOT_REQUIRED_DEDICATED_BONDING
            }
            ClassicAuthRequirement::MitmRequiredDedicatedBonding => {
                AUTH_REQ_MITM_REQUIRED_DEDICATED_BONDING
            }
            ClassicAuthRequirement::MitmNotRequiredGeneralBonding => {
                AUTH_REQ_MITM_NOT_REQUIRED_GENERAL_BONDING
            }
            ClassicAuthRequirement::MitmRequiredGeneralBonding => {
                AUTH_REQ_MITM_REQUIRED_GENERAL_BONDING
            }
        }
    }

    /// Convert from a peer-supplied value. Reserved values are read as the
    /// strictest requirement.
    pub fn from_u8(value: u8) -> Self {
        match value {
            AUTH_REQ_MITM_NOT_REQUIRED_NO_BONDING => {
                ClassicAuthRequirement::MitmNotRequiredNoBonding
            }
            AUTH_REQ_MITM_REQUIRED_NO_BONDING => ClassicAuthRequirement::MitmRequiredNoBonding,
            AUTH_REQ_MITM_NOT_REQUIRED_DEDICATED_BONDING => {
                ClassicAuthRequirement::MitmNotRequiredDedicatedBonding
            }
            AUTH_REQ_MITM_REQUIRED_DEDICATED_BONDING => {
                ClassicAuthRequirement::MitmRequiredDedicatedBonding
            }
            AUTH_REQ_MITM_NOT_REQUIRED_GENERAL_BONDING => {
                ClassicAuthRequirement::MitmNotRequiredGeneralBonding
            }
            _ => ClassicAuthRequirement::MitmRequiredGeneralBonding,
        }
    }
}

/// LE authentication requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRequirements {
    /// Whether bonding is required
    pub bonding: bool,
    /// Whether MITM protection is required
    pub mitm: bool,
    /// Whether Secure Connections is required
    pub secure_connections: bool,
    /// Whether keypress notifications are required
    pub keypress_notifications: bool,
    /// Whether CT2 feature is supported
    pub ct2: bool,
}

impl AuthRequirements {
    /// Create new authentication requirements
    pub fn new(bonding: bool, mitm: bool, secure_connections: bool) -> Self {
        Self {
            bonding,
            mitm,
            secure_connections,
            keypress_notifications: false,
            ct2: false,
        }
    }

    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        let mut value = 0;

        if self.bonding {
            value |= SMP_AUTH_REQ_BONDING;
        }

        if self.mitm {
            value |= SMP_AUTH_REQ_MITM;
        }

        if self.secure_connections {
            value |= SMP_AUTH_REQ_SC;
        }

        if self.keypress_notifications {
            value |= SMP_AUTH_REQ_KEYPRESS;
        }

        if self.ct2 {
            value |= SMP_AUTH_REQ_CT2;
        }

        value
    }

    /// Convert from u8 value, ignoring RFU bits
    pub fn from_u8(value: u8) -> Self {
        Self {
            bonding: (value & SMP_AUTH_REQ_BONDING) != 0,
            mitm: (value & SMP_AUTH_REQ_MITM) != 0,
            secure_connections: (value & SMP_AUTH_REQ_SC) != 0,
            keypress_notifications: (value & SMP_AUTH_REQ_KEYPRESS) != 0,
            ct2: (value & SMP_AUTH_REQ_CT2) != 0,
        }
    }

    /// Whether a raw value sets any reserved bit
    pub fn has_rfu_bits(value: u8) -> bool {
        value & SMP_AUTH_REQ_RFU != 0
    }
}

impl Default for AuthRequirements {
    /// Bonding, MITM, Secure Connections and CT2
    fn default() -> Self {
        Self {
            bonding: true,
            mitm: true,
            secure_connections: true,
            keypress_notifications: false,
            ct2: true,
        }
    }
}

bitflags! {
    /// Key types the local device will initiate or accept distribution of
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyDistribution: u8 {
        /// Encryption key (LTK, EDIV, RAND)
        const ENC = SMP_KEY_DIST_ENC_KEY;
        /// Identity key (IRK, identity address)
        const ID = SMP_KEY_DIST_ID_KEY;
        /// Signing key (CSRK)
        const SIGN = SMP_KEY_DIST_SIGN_KEY;
        /// Link key derivation
        const LINK = SMP_KEY_DIST_LINK_KEY;
    }
}

/// Simple pairing OOB data: confirmation (hash C) and randomizer R.
///
/// Wiped on drop and never printed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct OobData {
    c: [u8; KEY_SIZE],
    r: [u8; KEY_SIZE],
}

impl OobData {
    pub fn new(c: [u8; KEY_SIZE], r: [u8; KEY_SIZE]) -> Self {
        Self { c, r }
    }

    pub fn zeroed() -> Self {
        Self {
            c: [0; KEY_SIZE],
            r: [0; KEY_SIZE],
        }
    }

    /// Confirmation value C
    pub fn confirmation(&self) -> &[u8; KEY_SIZE] {
        &self.c
    }

    /// Random nonce R
    pub fn randomizer(&self) -> &[u8; KEY_SIZE] {
        &self.r
    }

    pub fn is_zero(&self) -> bool {
        self.c.iter().chain(self.r.iter()).all(|b| *b == 0)
    }
}

impl fmt::Debug for OobData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OobData { .. }")
    }
}
