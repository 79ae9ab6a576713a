//! Capability decisions for classic SSP and LE SMP
//!
//! Every decision is a pure function of the peer, the negotiation kind and
//! the configuration snapshot. A configuration value that is missing or out
//! of range never fails a decision: it is replaced by its default and the
//! whole decision degrades to MITM required without OOB.

use super::config::TrustConfig;
use crate::gap::BdAddr;
use crate::security::constants::*;
use crate::security::*;
use log::{debug, warn};
use std::sync::Arc;

/// Point in the pairing state machines at which a decision is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationKind {
    /// Classic SSP, local side sent the IO capability request first
    ClassicInitiator,
    /// Classic SSP, peer initiated
    ClassicResponder,
    /// LE SMP
    Le,
}

/// Local answer to a classic IO capability request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicCapabilities {
    pub io_capability: IoCapability,
    pub oob: OobAvailability,
    pub auth_req: ClassicAuthRequirement,
}

/// Local answer to an LE pairing feature exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeCapabilities {
    pub io_capability: IoCapability,
    pub oob: OobAvailability,
    pub auth_req: AuthRequirements,
    /// Maximum encryption key size (7-16)
    pub max_key_size: u8,
    /// Keys the initiator distributes
    pub initiator_keys: KeyDistribution,
    /// Keys the responder distributes
    pub responder_keys: KeyDistribution,
}

/// Decision for any negotiation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capabilities {
    Classic(ClassicCapabilities),
    Le(LeCapabilities),
}

/// Deterministic capability policy over a configuration snapshot
#[derive(Debug, Clone)]
pub struct CapabilityPolicy {
    config: Arc<TrustConfig>,
}

impl CapabilityPolicy {
    pub fn new(config: Arc<TrustConfig>) -> Self {
        Self { config }
    }

    /// A policy over a different snapshot
    pub fn with_config(&self, config: Arc<TrustConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    pub fn decide(&self, peer: &BdAddr, kind: NegotiationKind) -> Capabilities {
        match kind {
            NegotiationKind::ClassicInitiator => Capabilities::Classic(self.classic(peer, true)),
            NegotiationKind::ClassicResponder => Capabilities::Classic(self.classic(peer, false)),
            NegotiationKind::Le => Capabilities::Le(self.le(peer)),
        }
    }

    /// Classic SSP capabilities for `peer`
    pub fn classic(&self, peer: &BdAddr, is_initiator: bool) -> ClassicCapabilities {
        let trust = &self.config.classic;
        let mut degraded = false;

        let io_capability = match trust.io_capability {
            Some(cap) if cap.is_valid_classic() => cap,
            Some(cap) => {
                warn!("{}: {} is not a classic IO capability", peer, cap);
                degraded = true;
                IoCapability::DisplayYesNo
            }
            None => {
                degraded = true;
                IoCapability::DisplayYesNo
            }
        };

        let mitm = match trust.mitm_required {
            Some(mitm) => mitm,
            None => {
                degraded = true;
                true
            }
        };

        // Locally initiated bonding is dedicated, a peer-initiated one general
        let bonding = match (trust.bonding, is_initiator) {
            (false, _) => Bonding::NoBonding,
            (true, true) => Bonding::Dedicated,
            (true, false) => Bonding::General,
        };

        let (mitm, oob) = if degraded {
            warn!("{}: classic trust configuration incomplete, requiring MITM", peer);
            (true, OobAvailability::NotPresent)
        } else {
            (mitm, self.config.oob_available_for(peer).into())
        };

        let caps = ClassicCapabilities {
            io_capability,
            oob,
            auth_req: ClassicAuthRequirement::new(bonding, mitm),
        };
        debug!(
            "{}: classic io_cap={} oob={:?} auth_req={:#04x} initiator={}",
            peer,
            caps.io_capability,
            caps.oob,
            caps.auth_req.to_u8(),
            is_initiator
        );
        caps
    }

    /// LE SMP capabilities and key distribution scope for `peer`
    pub fn le(&self, peer: &BdAddr) -> LeCapabilities {
        let opts = &self.config.le;
        let mut degraded = false;

        let io_capability = match IoCapability::from_u8(opts.io_cap) {
            Some(cap) => cap,
            None => {
                warn!("{}: invalid LE io_cap {:#04x}", peer, opts.io_cap);
                degraded = true;
                IoCapability::KeyboardDisplay
            }
        };

        let mut auth_req = if AuthRequirements::has_rfu_bits(opts.auth_req) {
            warn!("{}: LE auth_req {:#04x} sets reserved bits", peer, opts.auth_req);
            degraded = true;
            AuthRequirements::default()
        } else {
            AuthRequirements::from_u8(opts.auth_req)
        };

        let initiator_keys = match KeyDistribution::from_bits(opts.init_key) {
            Some(keys) => keys,
            None => {
                warn!("{}: invalid initiator key mask {:#04x}", peer, opts.init_key);
                degraded = true;
                KeyDistribution::all()
            }
        };

        let responder_keys = match KeyDistribution::from_bits(opts.resp_key) {
            Some(keys) => keys,
            None => {
                warn!("{}: invalid responder key mask {:#04x}", peer, opts.resp_key);
                degraded = true;
                KeyDistribution::all()
            }
        };

        let max_key_size =
            if (SMP_MIN_ENCRYPTION_KEY_SIZE..=SMP_MAX_ENCRYPTION_KEY_SIZE).contains(&opts.max_key_size) {
                opts.max_key_size
            } else {
                warn!("{}: invalid max key size {}", peer, opts.max_key_size);
                degraded = true;
                SMP_MAX_ENCRYPTION_KEY_SIZE
            };

        let oob = if degraded {
            auth_req.mitm = true;
            OobAvailability::NotPresent
        } else {
            self.config.oob_available_for(peer).into()
        };

        let caps = LeCapabilities {
            io_capability,
            oob,
            auth_req,
            max_key_size,
            initiator_keys,
            responder_keys,
        };
        debug!(
            "{}: le io_cap={} oob={:?} auth_req={:#04x} max_key_size={} init_keys={:#04x} resp_keys={:#04x}",
            peer,
            caps.io_capability,
            caps.oob,
            caps.auth_req.to_u8(),
            caps.max_key_size,
            caps.initiator_keys.bits(),
            caps.responder_keys.bits()
        );
        caps
    }
}
