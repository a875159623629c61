use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use murmur_client::{MemoryStore, Store};
use serde::{de::DeserializeOwned, Serialize};

/// A local store dumped to a JSON file, rewritten on every change
pub struct FileStore {
    path: PathBuf,
    mem: MemoryStore,
}

impl FileStore {
    pub fn open(path: &Path) -> anyhow::Result<FileStore> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading store file {path:?}"))?;
        let dump = serde_json::from_str(&contents)
            .with_context(|| format!("parsing store file {path:?}"))?;
        Ok(FileStore {
            path: path.to_path_buf(),
            mem: MemoryStore::from_json(dump)
                .with_context(|| format!("loading store file {path:?}"))?,
        })
    }

    /// Refuses to overwrite an existing file
    pub fn create(path: &Path) -> anyhow::Result<FileStore> {
        if path.exists() {
            bail!("store file {path:?} already exists");
        }
        let res = FileStore {
            path: path.to_path_buf(),
            mem: MemoryStore::new(),
        };
        res.flush()?;
        Ok(res)
    }

    // Write to a sibling temporary file then rename, so that an interrupted
    // write never leaves a truncated store behind
    fn flush(&self) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temporary file in {dir:?}"))?;
        serde_json::to_writer_pretty(&mut file, &self.mem.to_json())
            .context("serializing store")?;
        file.write_all(b"\n").context("writing store")?;
        file.persist(&self.path)
            .with_context(|| format!("replacing store file {:?}", self.path))?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        self.mem.get(key)
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        self.mem.set(key, value)?;
        self.flush()
    }

    fn delete(&mut self, key: &str) -> anyhow::Result<()> {
        self.mem.delete(key)?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_opens() {
        let dir = tempfile::tempdir().expect("creating tempdir");
        let path = dir.path().join("store.json");

        let mut store = FileStore::create(&path).expect("creating store");
        store.set("foo", &vec![1, 2]).expect("setting foo");
        store.set("bar", &"baz").expect("setting bar");
        store.delete("bar").expect("deleting bar");

        let store = FileStore::open(&path).expect("reopening store");
        assert_eq!(store.get::<Vec<u32>>("foo").unwrap(), Some(vec![1, 2]));
        assert_eq!(store.get::<String>("bar").unwrap(), None);

        assert!(FileStore::create(&path).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let dir = tempfile::tempdir().expect("creating tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").expect("writing garbage");
        assert!(FileStore::open(&path).is_err());
        std::fs::write(&path, "{").expect("writing garbage");
        assert!(FileStore::open(&path).is_err());
    }
}
