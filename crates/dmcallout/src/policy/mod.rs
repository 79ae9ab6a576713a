//! Capability policy
//!
//! Decides the local IO capability, OOB availability and authentication
//! requirement for classic and LE pairing from an immutable trust
//! configuration snapshot.

mod capability;
mod config;


pub use self::capability::*;
pub use self::config::*;
