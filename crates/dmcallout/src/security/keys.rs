//! Local LE identity key material and the store it is reloaded from
//!
//! The platform persists the local encryption root (ER) and the identity
//! keys (IR, IRK, DHK) as hex strings in its adapter section. This module
//! decodes that representation into fixed-size key material and defines
//! the adapter trait the store is reached through.

use super::constants::*;
use bitflags::bitflags;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 128-bit key value
pub type Key128 = [u8; KEY_SIZE];

/// Faults raised by a local key store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyStoreError {
    #[error("Key store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt {entry} entry: {reason}")]
    Corrupt { entry: &'static str, reason: String },
}

bitflags! {
    /// Which local key groups were found in the store
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LocalKeyMask: u8 {
        /// IR, IRK and DHK are all present
        const ID = LOCAL_KEY_TYPE_ID;
        /// Encryption root is present
        const ER = LOCAL_KEY_TYPE_ER;
    }
}

impl Default for LocalKeyMask {
    fn default() -> Self {
        Self::empty()
    }
}

/// Local identification keys
#[derive(Clone, PartialEq, Eq, Default, Zeroize, ZeroizeOnDrop)]
pub struct LocalIdKeys {
    /// Identity root
    pub ir: Key128,
    /// Identity resolving key
    pub irk: Key128,
    /// Diversifier hiding key
    pub dhk: Key128,
}

impl LocalIdKeys {
    pub fn is_zero(&self) -> bool {
        self.ir
            .iter()
            .chain(self.irk.iter())
            .chain(self.dhk.iter())
            .all(|b| *b == 0)
    }
}

impl fmt::Debug for LocalIdKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalIdKeys")
            .field("zero", &self.is_zero())
            .finish_non_exhaustive()
    }
}

/// Result of reloading local keys at startup.
///
/// A mask of [`LocalKeyMask::empty`] with all-zero key material is the
/// "first-time device" sentinel, not an error.
#[derive(Clone, PartialEq, Eq, Default, Zeroize, ZeroizeOnDrop)]
pub struct LocalKeyReload {
    #[zeroize(skip)]
    pub mask: LocalKeyMask,
    /// Encryption root
    pub er: Key128,
    pub id_keys: LocalIdKeys,
}

impl LocalKeyReload {
    /// The "no keys" sentinel
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.mask.is_empty()
    }
}

impl fmt::Debug for LocalKeyReload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyReload")
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

/// Local keys as persisted: hex strings, any of which may be missing
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredLocalKeys {
    pub er: Option<String>,
    pub ir: Option<String>,
    pub irk: Option<String>,
    pub dhk: Option<String>,
}

impl StoredLocalKeys {
    /// Encode key material into its persisted form
    pub fn encode(reload: &LocalKeyReload) -> Self {
        let mut stored = Self::default();
        if reload.mask.contains(LocalKeyMask::ER) {
            stored.er = Some(hex::encode(reload.er));
        }
        if reload.mask.contains(LocalKeyMask::ID) {
            stored.ir = Some(hex::encode(reload.id_keys.ir));
            stored.irk = Some(hex::encode(reload.id_keys.irk));
            stored.dhk = Some(hex::encode(reload.id_keys.dhk));
        }
        stored
    }

    /// Decode the persisted form. An entry that is present but not a
    /// 16-octet hex string makes the whole record corrupt; an incomplete
    /// identity key set only leaves [`LocalKeyMask::ID`] unset.
    pub fn decode(&self) -> Result<LocalKeyReload, KeyStoreError> {
        let er = decode_entry("ER", self.er.as_deref())?;
        let ir = decode_entry("IR", self.ir.as_deref())?;
        let irk = decode_entry("IRK", self.irk.as_deref())?;
        let dhk = decode_entry("DHK", self.dhk.as_deref())?;

        let mut reload = LocalKeyReload::none();
        if let Some(er) = er {
            reload.mask |= LocalKeyMask::ER;
            reload.er = er;
        }
        if let (Some(ir), Some(irk), Some(dhk)) = (ir, irk, dhk) {
            reload.mask |= LocalKeyMask::ID;
            reload.id_keys = LocalIdKeys { ir, irk, dhk };
        }
        Ok(reload)
    }
}

impl fmt::Debug for StoredLocalKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredLocalKeys")
            .field("er", &self.er.is_some())
            .field("ir", &self.ir.is_some())
            .field("irk", &self.irk.is_some())
            .field("dhk", &self.dhk.is_some())
            .finish()
    }
}

fn decode_entry(entry: &'static str, value: Option<&str>) -> Result<Option<Key128>, KeyStoreError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let bytes = hex::decode(value.trim()).map_err(|e| KeyStoreError::Corrupt {
        entry,
        reason: e.to_string(),
    })?;

    let key: Key128 = bytes.as_slice().try_into().map_err(|_| KeyStoreError::Corrupt {
        entry,
        reason: format!("expected {} octets, found {}", KEY_SIZE, bytes.len()),
    })?;

    Ok(Some(key))
}

/// Durable storage holding the local identity keys.
///
/// Writing keys is done by whoever generates them; this crate only reads.
pub trait LocalKeyStore {
    /// Load the persisted local keys, `None` when nothing was ever saved
    fn load(&self) -> Result<Option<StoredLocalKeys>, KeyStoreError>;
}

impl<T: LocalKeyStore + ?Sized> LocalKeyStore for Arc<T> {
    fn load(&self) -> Result<Option<StoredLocalKeys>, KeyStoreError> {
        (**self).load()
    }
}

impl<T: LocalKeyStore + ?Sized> LocalKeyStore for Box<T> {
    fn load(&self) -> Result<Option<StoredLocalKeys>, KeyStoreError> {
        (**self).load()
    }
}

/// In-memory implementation of LocalKeyStore
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: RwLock<Option<StoredLocalKeys>>,
}

impl MemoryKeyStore {
    /// Create a new empty in-memory key store
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(None),
        }
    }

    /// Create a store already holding the given keys
    pub fn with_keys(reload: &LocalKeyReload) -> Self {
        Self {
            keys: RwLock::new(Some(StoredLocalKeys::encode(reload))),
        }
    }

    /// Replace the persisted record
    pub fn save(&self, stored: StoredLocalKeys) -> Result<(), KeyStoreError> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| KeyStoreError::Unavailable("lock poisoned".into()))?;
        *keys = Some(stored);
        Ok(())
    }

    /// Remove the persisted record
    pub fn clear(&self) -> Result<(), KeyStoreError> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| KeyStoreError::Unavailable("lock poisoned".into()))?;
        *keys = None;
        Ok(())
    }
}

impl LocalKeyStore for MemoryKeyStore {
    fn load(&self) -> Result<Option<StoredLocalKeys>, KeyStoreError> {
        let keys = self
            .keys
            .read()
            .map_err(|_| KeyStoreError::Unavailable("lock poisoned".into()))?;
        Ok(keys.clone())
    }
}
