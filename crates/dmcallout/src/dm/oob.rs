//! Platform out-of-band channel

use crate::gap::BdAddr;
use crate::security::OobData;

/// Channel to the platform's OOB transport (NFC and the like).
///
/// Both calls are notifications; answers come back to the pairing engine
/// by a route this crate does not own. Implementations must not keep the
/// [`OobData`] they are shown beyond the call.
pub trait OobChannel: Send + Sync {
    /// Local OOB data was read from the controller, `None` if the read failed
    fn local_oob_ready(&self, data: Option<&OobData>);

    /// The engine needs OOB data for `peer`
    fn request_remote_oob(&self, peer: BdAddr);
}

/// OOB channel for platforms without an OOB transport
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOobChannel;

impl OobChannel for NoOobChannel {
    fn local_oob_ready(&self, _data: Option<&OobData>) {}

    fn request_remote_oob(&self, _peer: BdAddr) {}
}
