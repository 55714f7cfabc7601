use crate::domain::ports::PendingRequestStore;
use crate::domain::switch::SwitchRequest;
use crate::error::{Result, SwitchError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding started tokens keyed by session name.
pub const CF_PENDING: &str = "pending_requests";

/// A persistent token store backed by RocksDB.
///
/// Tokens are stored in their base64 JSON form. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBPendingStore {
    db: Arc<DB>,
}

impl RocksDBPendingStore {
    /// Opens or creates a RocksDB instance at `path` with the pending column family.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_pending = ColumnFamilyDescriptor::new(CF_PENDING, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_pending])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn load(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let cf = self.cf()?;
        match self.db.get_cf(&cf, session.as_bytes())? {
            Some(bytes) => {
                let encoded = String::from_utf8(bytes).map_err(|e| {
                    SwitchError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })?;
                Ok(Some(SwitchRequest::from_base64_encoded_json(&encoded)?))
            }
            None => Ok(None),
        }
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_PENDING)
            .ok_or_else(|| SwitchError::Io(std::io::Error::other("Pending column family not found")))
    }
}

#[async_trait]
impl PendingRequestStore for RocksDBPendingStore {
    async fn save(&self, session: &str, request: &SwitchRequest) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .put_cf(&cf, session.as_bytes(), request.to_base64_encoded_json()?)?;
        Ok(())
    }

    async fn take(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let request = self.load(session)?;
        if request.is_some() {
            let cf = self.cf()?;
            self.db.delete_cf(&cf, session.as_bytes())?;
        }
        Ok(request)
    }

    async fn peek(&self, session: &str) -> Result<Option<SwitchRequest>> {
        self.load(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBPendingStore::open(dir.path()).expect("Failed to open RocksDB");
        assert!(store.db.cf_handle(CF_PENDING).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_pending_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBPendingStore::open(dir.path()).unwrap();
        let request = SwitchRequest::new(1, "http://", json!({"test_key": "test_value"}), "scheme", false);

        store.save("default", &request).await.unwrap();
        assert_eq!(store.peek("default").await.unwrap(), Some(request.clone()));
        assert_eq!(store.take("default").await.unwrap(), Some(request));
        assert!(store.take("default").await.unwrap().is_none());
    }
}
