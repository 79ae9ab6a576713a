//! LE Security Manager callouts

use crate::gap::BdAddr;
use crate::policy::{CapabilityPolicy, LeCapabilities};
use crate::security::{KeyStoreError, LocalKeyReload, LocalKeyStore};
use log::{debug, info, warn};
use std::sync::{Mutex, PoisonError};

/// Answers the LE SMP callouts of the pairing engine and reloads the local
/// identity keys.
///
/// The first successful or failed reload is cached for the lifetime of the
/// negotiator; [`invalidate_local_keys`](Self::invalidate_local_keys)
/// makes the next call read the store again. The engine decides when to
/// reload, typically once at bring-up before any LE pairing.
pub struct BleSecurityNegotiator<S: LocalKeyStore> {
    policy: CapabilityPolicy,
    store: S,
    local_keys: Mutex<Option<LocalKeyReload>>,
    last_fault: Mutex<Option<KeyStoreError>>,
}

impl<S: LocalKeyStore> BleSecurityNegotiator<S> {
    pub fn new(policy: CapabilityPolicy, store: S) -> Self {
        Self {
            policy,
            store,
            local_keys: Mutex::new(None),
            last_fault: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> &CapabilityPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Local IO capability, OOB availability, authentication requirement,
    /// maximum key size and key distribution scope for pairing with `peer`
    pub fn request_local_ble_io_capability(&self, peer: &BdAddr) -> LeCapabilities {
        self.policy.le(peer)
    }

    /// Local ER and identity keys. An empty, unreadable or corrupt store
    /// yields the all-zero "no keys" result.
    pub fn load_local_identity_keys(&self) -> LocalKeyReload {
        let mut cached = self.local_keys.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(keys) = cached.as_ref() {
            return keys.clone();
        }

        let keys = self.read_store();
        *cached = Some(keys.clone());
        keys
    }

    /// Forget the cached reload result
    pub fn invalidate_local_keys(&self) {
        let mut cached = self.local_keys.lock().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
        debug!("local key cache invalidated");
    }

    /// The fault behind the most recent "no keys" fallback, if any
    pub fn last_load_fault(&self) -> Option<KeyStoreError> {
        self.last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_store(&self) -> LocalKeyReload {
        let result = self
            .store
            .load()
            .and_then(|stored| stored.map(|s| s.decode()).transpose());

        match result {
            Ok(Some(keys)) => {
                info!("Loaded local LE keys, mask {:?}", keys.mask);
                self.set_fault(None);
                keys
            }
            Ok(None) => {
                info!("No local LE keys stored");
                self.set_fault(None);
                LocalKeyReload::none()
            }
            Err(e) => {
                warn!("Local LE keys unusable, continuing without: {}", e);
                self.set_fault(Some(e));
                LocalKeyReload::none()
            }
        }
    }

    fn set_fault(&self, fault: Option<KeyStoreError>) {
        *self.last_fault.lock().unwrap_or_else(PoisonError::into_inner) = fault;
    }
}
