use crate::domain::account::GatewayAccount;
use crate::domain::ports::GatewayAccountStore;
use crate::error::Result;
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing gateway account snapshots.
pub const CF_ACCOUNTS: &str = "accounts";

/// A persistent account store implementation using RocksDB.
///
/// Accounts are stored as JSON under their external id in the `accounts`
/// column family.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "accounts" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn accounts_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_ACCOUNTS).ok_or_else(|| {
            std::io::Error::other("Accounts column family not found").into()
        })
    }
}

#[async_trait]
impl GatewayAccountStore for RocksDBStore {
    async fn store(&self, account: GatewayAccount) -> Result<()> {
        let cf = self.accounts_cf()?;
        let value = serde_json::to_vec(&account)?;
        self.db.put_cf(cf, account.external_id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, external_id: &str) -> Result<Option<GatewayAccount>> {
        let cf = self.accounts_cf()?;
        match self.db.get_cf(cf, external_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<GatewayAccount>> {
        let cf = self.accounts_cf()?;
        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(serde_json::from_slice(&value)?);
        }
        Ok(accounts)
    }
}
