//! Shared node state: the in-memory registry plus its storage backend.

use std::time::Instant;

use passledger_core::AccountId;
use passledger_registry::{Passport, PassportRegistry};

use crate::storage::Storage;

/// State shared across all API handlers.
pub struct AppState {
    /// The passport registry state machine.
    pub registry: PassportRegistry,
    /// Persistent backend; `None` for ephemeral (test) nodes.
    storage: Option<Storage>,
    /// When the node started, for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    /// Build node state on top of opened storage, loading every
    /// persisted passport into the registry.
    pub fn new(storage: Storage) -> anyhow::Result<Self> {
        let registry = PassportRegistry::new();
        let mut loaded = 0usize;
        for data in storage.passports()? {
            let passport: Passport = serde_json::from_slice(&data)?;
            registry.load_passport(passport);
            loaded += 1;
        }
        if loaded > 0 {
            tracing::info!(count = loaded, "loaded passports from storage");
        }
        Ok(Self {
            registry,
            storage: Some(storage),
            start_time: Instant::now(),
        })
    }

    /// Ephemeral state with no persistence.
    pub fn ephemeral() -> Self {
        Self {
            registry: PassportRegistry::new(),
            storage: None,
            start_time: Instant::now(),
        }
    }

    /// Write the named passport back to storage after a commit.
    pub fn persist(&self, account: &AccountId) -> anyhow::Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        if let Some(passport) = self.registry.passport(account) {
            let data = serde_json::to_vec(&passport)?;
            storage.put_passport(account.as_str(), &data)?;
        }
        Ok(())
    }
}
