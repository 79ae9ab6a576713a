//! Device manager callouts
//!
//! Entry points the pairing engine calls synchronously in the middle of
//! its classic SSP and LE SMP state machines. None of them blocks, fails
//! or keeps per-peer state.

mod ble;
mod oob;
mod pairing;


pub use self::ble::BleSecurityNegotiator;
pub use self::oob::*;
pub use self::pairing::*;
