//! dmcallout - Bluetooth device manager callouts
//!
//! This library is the boundary between a Bluetooth pairing and call-setup
//! engine and the platform it runs on. It answers the engine's synchronous
//! callouts:
//! - Classic Secure Simple Pairing IO capability and OOB exchange
//! - LE Security Manager pairing features and local identity key reload
//! - SCO voice audio transfer between the link and an audio backend
//!
//! Every callout degrades gracefully instead of failing, since the engine's
//! state machines have no way to unwind a failed callout.

pub mod dm;
pub mod error;
pub mod gap;
pub mod policy;
pub mod sco;
pub mod security;

// Re-export common types for convenience
pub use dm::{BleSecurityNegotiator, NoOobChannel, OobChannel, PairingNegotiator};
pub use error::{Error, Result};
pub use gap::BdAddr;
pub use policy::{
    CapabilityPolicy, ClassicCapabilities, LeCapabilities, LeSmpOptions, NegotiationKind,
    TrustConfig,
};
pub use sco::{AudioBackend, AudioFrame, MemoryAudioBackend, ScoAudioPump, ScoDataStatus};
pub use security::{
    AuthRequirements, ClassicAuthRequirement, IoCapability, KeyDistribution, LocalKeyReload,
    LocalKeyStore, MemoryKeyStore, OobAvailability, OobData,
};
