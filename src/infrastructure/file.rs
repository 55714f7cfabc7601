use crate::domain::ports::PendingRequestStore;
use crate::domain::switch::SwitchRequest;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Persists started tokens as a JSON map of session name to base64 token.
///
/// The whole file is rewritten on every change; the mutex keeps writers in
/// this process from interleaving.
pub struct JsonFilePendingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFilePendingStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(entries)?).await?;
        Ok(())
    }
}

#[async_trait]
impl PendingRequestStore for JsonFilePendingStore {
    async fn save(&self, session: &str, request: &SwitchRequest) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(session.to_string(), request.to_base64_encoded_json()?);
        self.write(&entries).await
    }

    async fn take(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let Some(encoded) = entries.remove(session) else {
            return Ok(None);
        };
        self.write(&entries).await?;
        Ok(Some(SwitchRequest::from_base64_encoded_json(&encoded)?))
    }

    async fn peek(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .get(session)
            .map(|encoded| SwitchRequest::from_base64_encoded_json(encoded))
            .transpose()
    }
}
