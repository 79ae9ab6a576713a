//! Pairing security vocabulary
//!
//! Types shared by the classic Secure Simple Pairing and LE Security
//! Manager callouts:
//! - IO capabilities and OOB availability
//! - Classic and LE authentication requirements
//! - LE key distribution scope
//! - OOB data and the local identity key material reloaded at startup

pub mod constants;
mod keys;
mod types;

#[cfg(test)]
mod tests;

pub use self::keys::*;
pub use self::types::*;
