use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collection, LedgerStore};

/// Process-local store. Used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<Collection, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self, collection: Collection) -> anyhow::Result<Option<serde_json::Value>> {
        Ok(self.inner.read().await.get(&collection).cloned())
    }

    async fn save(&self, collection: Collection, value: serde_json::Value) -> anyhow::Result<()> {
        self.inner.write().await.insert(collection, value);
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
