use crate::domain::account::GatewayAccount;
use crate::domain::ports::GatewayAccountStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for gateway accounts.
///
/// Uses `Arc<RwLock<BTreeMap<String, GatewayAccount>>>` keyed by account
/// external id, so `get_all` returns accounts in a stable order.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<BTreeMap<String, GatewayAccount>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GatewayAccountStore for InMemoryAccountStore {
    async fn store(&self, account: GatewayAccount) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.external_id.clone(), account);
        Ok(())
    }

    async fn get(&self, external_id: &str) -> Result<Option<GatewayAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(external_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<GatewayAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }
}
