use std::collections::HashMap;

use anyhow::{anyhow, Context};
use serde::{de::DeserializeOwned, Serialize};

/// Key-value storage holding JSON values, modeled after the browser's
/// `localStorage`
pub trait Store {
    /// Returns `Ok(None)` if nothing is stored under `key`
    fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>>;
    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()>;
    fn delete(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore(HashMap<String, serde_json::Value>);

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore(HashMap::new())
    }

    /// Parses a dump, as generated by `to_json`
    pub fn from_json(dump: serde_json::Value) -> anyhow::Result<MemoryStore> {
        match dump {
            serde_json::Value::Object(map) => Ok(MemoryStore(map.into_iter().collect())),
            serde_json::Value::Null => Ok(MemoryStore::new()),
            _ => Err(anyhow!("store dump is not a json object")),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Store for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        self.0
            .get(key)
            .map(|v| T::deserialize(v))
            .transpose()
            .with_context(|| format!("parsing value stored under {key:?}"))
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("serializing value to store under {key:?}"))?;
        self.0.insert(String::from(key), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> anyhow::Result<()> {
        self.0.remove(key);
        Ok(())
    }
}
