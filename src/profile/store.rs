//! Key-value token storage injected into the profile view.

use secrecy::SecretString;
use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, PoisonError},
};

use crate::TOKEN_KEY;

/// String key-value store, the stand-in for browser-local storage.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Read the bearer token under `jwt_token`. Empty strings count as absent.
pub fn read_token<S: TokenStore + ?Sized>(store: &S) -> Option<SecretString> {
    store
        .get(TOKEN_KEY)
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

/// In-memory store. Values are never printed by `Debug`.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a token under `jwt_token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(TOKEN_KEY, token.into());
        store
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.lock().keys().cloned().collect();
        formatter
            .debug_struct("MemoryTokenStore")
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn set_get_remove() {
        let store = MemoryTokenStore::new();
        assert!(store.get(TOKEN_KEY).is_none());

        store.set(TOKEN_KEY, "abc".to_string());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove(TOKEN_KEY);
        assert!(!store.contains(TOKEN_KEY));
    }

    #[test]
    fn read_token_ignores_empty_values() {
        let store = MemoryTokenStore::with_token("");
        assert!(read_token(&store).is_none());

        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(
            read_token(&store).map(|t| t.expose_secret().to_string()),
            Some("abc".to_string())
        );
    }

    #[test]
    fn debug_hides_values() {
        let store = MemoryTokenStore::with_token("super-secret");
        let rendered = format!("{store:?}");
        assert!(rendered.contains(TOKEN_KEY));
        assert!(!rendered.contains("super-secret"));
    }
}
