//! Synchronous connection-oriented (SCO) audio
//!
//! This module implements the audio path for voice links:
//! - Session lifecycle for the single active SCO connection
//! - Outbound frame production from the application's audio source
//! - Inbound frame delivery, including placeholders for lost frames
//! - HCI SCO data packet encoding and decoding

pub mod constants;
mod backend;
mod packet;
mod pump;
mod types;

#[cfg(test)]
mod tests;

pub use self::backend::*;
pub use self::packet::*;
pub use self::pump::ScoAudioPump;
pub use self::types::*;
