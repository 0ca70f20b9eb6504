use super::account::GatewayAccount;
use crate::error::Result;
use async_trait::async_trait;

/// Data-access port for gateway account snapshots.
#[async_trait]
pub trait GatewayAccountStore: Send + Sync {
    async fn store(&self, account: GatewayAccount) -> Result<()>;
    async fn get(&self, external_id: &str) -> Result<Option<GatewayAccount>>;
    async fn get_all(&self) -> Result<Vec<GatewayAccount>>;
}

pub type GatewayAccountStoreBox = Box<dyn GatewayAccountStore>;
