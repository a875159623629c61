use anyhow::anyhow;
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
use murmur_client::Store;
use serde::{de::DeserializeOwned, Serialize};

/// The browser's `localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

// StorageError may hold a JsValue, which cannot cross threads, so it gets
// flattened into a message before being handed to anyhow
impl Store for BrowserStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match LocalStorage::get(key) {
            Ok(v) => Ok(Some(v)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(anyhow!("reading {key:?} from local storage: {e}")),
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        LocalStorage::set(key, value)
            .map_err(|e| anyhow!("writing {key:?} to local storage: {e}"))
    }

    fn delete(&mut self, key: &str) -> anyhow::Result<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}
