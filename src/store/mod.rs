//! Persistence seam for the two ledger collections.
//!
//! Each collection is stored whole as a JSON array blob; a save replaces it.

pub mod memory;
pub mod pg;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bankrolls,
    Wagers,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Bankrolls => "bankrolls",
            Collection::Wagers => "wagers",
        }
    }
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// `None` when the collection has never been saved.
    async fn load(&self, collection: Collection) -> anyhow::Result<Option<serde_json::Value>>;

    async fn save(&self, collection: Collection, value: serde_json::Value) -> anyhow::Result<()>;

    /// Connectivity check for `/health`.
    async fn ping(&self) -> anyhow::Result<()>;
}
