use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::protocol::UserProfile;

// ── Transient store ─────────────────────────────────────────────────

/// Store key under which a completed analysis result lives.
pub const ANALYSIS_KEY: &str = "analysis";

/// Session-scoped key/value storage. Values are held JSON-encoded, the
/// way the browser client kept them, and die with the session.
#[derive(Debug)]
pub struct TransientStore {
    values: HashMap<String, String>,
}

impl TransientStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn put<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        self.values.insert(key.to_string(), encoded);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.values.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }
}

// ── Session context ─────────────────────────────────────────────────

/// Everything one connection's session owns outside the wizard itself:
/// the authenticated user, if any, and the transient store.
#[derive(Debug)]
pub struct SessionContext {
    pub user: Option<UserProfile>,
    pub store: TransientStore,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            user: None,
            store: TransientStore::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
