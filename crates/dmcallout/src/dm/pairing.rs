//! Classic Secure Simple Pairing callouts

use super::oob::OobChannel;
use crate::gap::BdAddr;
use crate::policy::{CapabilityPolicy, ClassicCapabilities};
use crate::security::*;
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of remote capability reports kept for diagnostics
pub const REMOTE_CAPABILITY_LOG_DEPTH: usize = 16;

/// IO capabilities a peer announced in its IO capability response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteIoReport {
    pub peer: BdAddr,
    /// `None` when the peer sent a value outside the defined range
    pub io_capability: Option<IoCapability>,
    pub oob: OobAvailability,
    pub auth_req: ClassicAuthRequirement,
}

/// Bounded journal of remote IO capability reports.
///
/// Diagnostics only: nothing recorded here influences a later decision.
#[derive(Debug)]
pub struct RemoteCapabilityLog {
    entries: Mutex<VecDeque<RemoteIoReport>>,
    depth: usize,
}

impl RemoteCapabilityLog {
    pub fn new(depth: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(depth)),
            depth,
        }
    }

    /// Append a report, dropping the oldest when full. Never fails.
    pub fn record(&self, report: RemoteIoReport) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if self.depth == 0 {
            return;
        }
        while entries.len() >= self.depth {
            entries.pop_front();
        }
        entries.push_back(report);
    }

    /// Reports currently held, oldest first
    pub fn entries(&self) -> Vec<RemoteIoReport> {
        self.entries
            .lock()
            .map(|entries| entries.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Most recent report for `peer`
    pub fn latest_for(&self, peer: &BdAddr) -> Option<RemoteIoReport> {
        self.entries
            .lock()
            .ok()?
            .iter()
            .rev()
            .find(|report| report.peer == *peer)
            .copied()
    }
}

impl Default for RemoteCapabilityLog {
    fn default() -> Self {
        Self::new(REMOTE_CAPABILITY_LOG_DEPTH)
    }
}

/// Answers the classic SSP callouts of the pairing engine.
///
/// Decisions hold no per-peer state, so calls for different peers may run
/// concurrently. Calls for one peer are expected in the order the engine's
/// state machine issues them.
pub struct PairingNegotiator {
    policy: CapabilityPolicy,
    oob_channel: Arc<dyn OobChannel>,
    remote_log: RemoteCapabilityLog,
}

impl PairingNegotiator {
    pub fn new(policy: CapabilityPolicy, oob_channel: Arc<dyn OobChannel>) -> Self {
        Self {
            policy,
            oob_channel,
            remote_log: RemoteCapabilityLog::default(),
        }
    }

    pub fn policy(&self) -> &CapabilityPolicy {
        &self.policy
    }

    pub fn remote_log(&self) -> &RemoteCapabilityLog {
        &self.remote_log
    }

    /// Local IO capability, OOB availability and authentication requirement
    /// for the IO capability request of `peer`
    pub fn request_local_io_capability(&self, peer: &BdAddr, is_initiator: bool) -> ClassicCapabilities {
        self.policy.classic(peer, is_initiator)
    }

    /// Record the capabilities `peer` announced
    pub fn report_remote_io_capability(
        &self,
        peer: &BdAddr,
        io_capability: IoCapability,
        oob: OobAvailability,
        auth_req: ClassicAuthRequirement,
    ) {
        self.record_remote(RemoteIoReport {
            peer: *peer,
            io_capability: Some(io_capability),
            oob,
            auth_req,
        });
    }

    /// Record capabilities straight from the peer's IO capability response
    pub fn report_remote_io_capability_raw(&self, peer: &BdAddr, io_capability: u8, oob: u8, auth_req: u8) {
        let parsed = IoCapability::from_u8(io_capability);
        if parsed.is_none() {
            warn!("{}: peer sent unknown io_cap {:#04x}", peer, io_capability);
        }

        self.record_remote(RemoteIoReport {
            peer: *peer,
            io_capability: parsed,
            oob: OobAvailability::from_u8(oob),
            auth_req: ClassicAuthRequirement::from_u8(auth_req),
        });
    }

    fn record_remote(&self, report: RemoteIoReport) {
        debug!(
            "{}: remote io_cap={:?} oob={:?} auth_req={:#04x}",
            report.peer,
            report.io_capability,
            report.oob,
            report.auth_req.to_u8()
        );
        self.remote_log.record(report);
    }

    /// Hand local OOB data read from the controller to the platform.
    /// When `valid` is false the data is discarded unseen.
    pub fn report_local_oob(&self, valid: bool, data: OobData) {
        debug!("local OOB data valid={}", valid);
        if valid {
            self.oob_channel.local_oob_ready(Some(&data));
        } else {
            drop(data);
            self.oob_channel.local_oob_ready(None);
        }
    }

    /// Ask the platform for OOB data of `peer`
    pub fn request_remote_oob(&self, peer: &BdAddr) {
        debug!("{}: requesting remote OOB data", peer);
        self.oob_channel.request_remote_oob(*peer);
    }
}
