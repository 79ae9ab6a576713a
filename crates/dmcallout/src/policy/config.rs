//! Trust configuration snapshot
//!
//! The policy never reads ambient state: everything it decides from lives
//! in a [`TrustConfig`] value that is built once and shared read-only.

use crate::gap::BdAddr;
use crate::security::constants::*;
use crate::security::IoCapability;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing configuration text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Expected {expected} SMP option fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Invalid SMP option value {0:?}")]
    InvalidValue(String),
}

/// Classic SSP trust settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicTrust {
    /// Local IO capability; `None` when the platform never configured one
    pub io_capability: Option<IoCapability>,
    /// Whether MITM protection is required; `None` when unknown
    pub mitm_required: Option<bool>,
    /// Whether pairings should bond
    pub bonding: bool,
}

impl Default for ClassicTrust {
    fn default() -> Self {
        Self {
            io_capability: Some(IoCapability::DisplayYesNo),
            mitm_required: Some(true),
            bonding: true,
        }
    }
}

/// Number of comma-separated fields in the SMP options string
pub const SMP_OPTIONS_FIELDS: usize = 5;

/// Raw LE SMP options as the platform stores them.
///
/// Values are kept unvalidated; the policy checks each one when it
/// decides and falls back to the default for anything out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeSmpOptions {
    pub auth_req: u8,
    pub io_cap: u8,
    pub init_key: u8,
    pub resp_key: u8,
    pub max_key_size: u8,
}

impl Default for LeSmpOptions {
    fn default() -> Self {
        Self {
            auth_req: SMP_AUTH_REQ_BONDING | SMP_AUTH_REQ_MITM | SMP_AUTH_REQ_SC | SMP_AUTH_REQ_CT2,
            io_cap: IO_CAPABILITY_KEYBOARD_DISPLAY,
            init_key: SMP_KEY_DIST_ALL,
            resp_key: SMP_KEY_DIST_ALL,
            max_key_size: SMP_MAX_ENCRYPTION_KEY_SIZE,
        }
    }
}

impl LeSmpOptions {
    /// Parse the `auth_req,io_cap,init_key,resp_key,max_key_size` form,
    /// e.g. `"0xD,0x4,0xf,0xf,0x10"`. Fields may be hex (`0x` prefix) or
    /// decimal.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if fields.len() != SMP_OPTIONS_FIELDS {
            return Err(ConfigError::FieldCount {
                expected: SMP_OPTIONS_FIELDS,
                found: fields.len(),
            });
        }

        let mut values = [0u8; SMP_OPTIONS_FIELDS];
        for (value, field) in values.iter_mut().zip(fields.iter()) {
            *value = parse_option_byte(field)?;
        }

        Ok(Self {
            auth_req: values[0],
            io_cap: values[1],
            init_key: values[2],
            resp_key: values[3],
            max_key_size: values[4],
        })
    }
}

fn parse_option_byte(field: &str) -> Result<u8, ConfigError> {
    let parsed = match field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => field.parse::<u8>(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue(field.to_string()))
}

impl FromStr for LeSmpOptions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LeSmpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x},{:#x},{:#x},{:#x},{:#x}",
            self.auth_req, self.io_cap, self.init_key, self.resp_key, self.max_key_size
        )
    }
}

/// Process-wide trust configuration, read-only once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustConfig {
    pub classic: ClassicTrust,
    pub le: LeSmpOptions,
    /// Master switch for out-of-band pairing
    pub oob_enabled: bool,
    /// Peers whose OOB data the platform holds
    pub oob_peers: HashSet<BdAddr>,
}

impl TrustConfig {
    /// Configuration for a platform that supplied nothing usable
    pub fn conservative() -> Self {
        Self {
            classic: ClassicTrust {
                io_capability: None,
                mitm_required: None,
                bonding: true,
            },
            le: LeSmpOptions::default(),
            oob_enabled: false,
            oob_peers: HashSet::new(),
        }
    }

    /// Build a configuration from an SMP options string, falling back to
    /// the conservative configuration when the string cannot be parsed
    pub fn from_smp_options(options: &str) -> Self {
        match options.parse::<LeSmpOptions>() {
            Ok(le) => Self {
                le,
                ..Self::default()
            },
            Err(e) => {
                log::warn!("Ignoring SMP options {:?}: {}", options, e);
                Self::conservative()
            }
        }
    }

    /// Record that OOB data is on hand for `peer` and enable OOB pairing
    pub fn with_oob_peer(mut self, peer: BdAddr) -> Self {
        self.oob_enabled = true;
        self.oob_peers.insert(peer);
        self
    }

    pub fn oob_available_for(&self, peer: &BdAddr) -> bool {
        self.oob_enabled && self.oob_peers.contains(peer)
    }
}
