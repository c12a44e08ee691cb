//! The API credential slot.
//!
//! In the app the key lives in the OS keychain. `MemoryCredentials` backs
//! tests and any environment without a keychain.

use std::sync::Mutex;

use keyring::Entry;
use tracing::{info, warn};

use crate::error::StudyError;

pub const KEYRING_SERVICE: &str = "ielts-reader-gemini-api";
pub const KEYRING_USER: &str = "ielts-reader";

pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, StudyError>;
    fn set(&self, key: &str) -> Result<(), StudyError>;
    /// Clearing an absent credential is not an error.
    fn clear(&self) -> Result<(), StudyError>;
}

/// Trim a user-entered key; blank input is rejected.
pub fn normalize_key(key: &str) -> Result<String, StudyError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StudyError::Keychain("Please enter an API key".to_string()));
    }
    Ok(trimmed.to_string())
}

pub struct KeychainCredentials {
    service: String,
    user: String,
}

impl KeychainCredentials {
    pub fn new(service: &str, user: &str) -> Self {
        Self {
            service: service.to_string(),
            user: user.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, StudyError> {
        Entry::new(&self.service, &self.user).map_err(|e| {
            warn!("Failed to create keyring entry for {}: {}", self.service, e);
            StudyError::Keychain(e.to_string())
        })
    }
}

impl Default for KeychainCredentials {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_USER)
    }
}

impl CredentialStore for KeychainCredentials {
    fn get(&self) -> Result<Option<String>, StudyError> {
        match self.entry()?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => {
                info!("No API key found for service: {}", self.service);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to get password for {}: {}", self.service, e);
                Err(StudyError::Keychain(e.to_string()))
            }
        }
    }

    fn set(&self, key: &str) -> Result<(), StudyError> {
        let key = normalize_key(key)?;
        info!("Setting API key for service: {}", self.service);
        self.entry()?.set_password(&key).map_err(|e| {
            warn!("Failed to set password for {}: {}", self.service, e);
            StudyError::Keychain(e.to_string())
        })
    }

    fn clear(&self) -> Result<(), StudyError> {
        info!("Deleting API key for service: {}", self.service);
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!("Failed to delete credential for {}: {}", self.service, e);
                Err(StudyError::Keychain(e.to_string()))
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryCredentials {
    key: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self) -> Result<Option<String>, StudyError> {
        let key = self
            .key
            .lock()
            .map_err(|e| StudyError::Keychain(e.to_string()))?;
        Ok(key.clone())
    }

    fn set(&self, key: &str) -> Result<(), StudyError> {
        let key = normalize_key(key)?;
        *self
            .key
            .lock()
            .map_err(|e| StudyError::Keychain(e.to_string()))? = Some(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StudyError> {
        *self
            .key
            .lock()
            .map_err(|e| StudyError::Keychain(e.to_string()))? = None;
        Ok(())
    }
}
