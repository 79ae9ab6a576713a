//! Error types for the dmcallout library
//!
//! Errors only surface at the seams: configuration and address parsing,
//! the key store and audio backend adapters, and the SCO packet codec.
//! The callouts themselves never return them.

use crate::gap::AddrParseError;
use crate::policy::ConfigError;
use crate::sco::{AudioError, ScoPacketError};
use crate::security::KeyStoreError;
use thiserror::Error;

/// Any error raised by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid device address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Key store error: {0}")]
    KeyStore(#[from] KeyStoreError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("SCO packet error: {0}")]
    Packet(#[from] ScoPacketError),
}

/// Result type for dmcallout operations
pub type Result<T> = std::result::Result<T, Error>;
