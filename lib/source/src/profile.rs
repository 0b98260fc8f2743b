//! Profile persistence
//!
//! Opaque key-value storage of the finish-time summary blob. The engine
//! writes it and never reads it back; whatever serves profile pages owns the
//! read path.

use ahash::AHashMap;
use async_trait::async_trait;
use parking_lot::RwLock;

use curata_core::Result;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<serde_json::Value>>;
    async fn save(&self, user_id: &str, summary: serde_json::Value) -> Result<()>;
}

/// Process-local profile store, for offline runs and tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<AHashMap<String, serde_json::Value>>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, user_id: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.profiles.read().get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, summary: serde_json::Value) -> Result<()> {
        self.profiles
            .write()
            .insert(user_id.to_string(), summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryProfileStore::new();
        assert!(store.load("u1").await.unwrap().is_none());

        let blob = serde_json::json!({"tasteTest": {"completed": true}});
        store.save("u1", blob.clone()).await.unwrap();
        assert_eq!(store.load("u1").await.unwrap(), Some(blob));
    }
}
