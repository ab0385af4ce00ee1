//! Key/value settings persistence.
//!
//! A [`SettingsStore`] keeps opaque bytes per key. [`Settings`] runs values
//! through the same encode and decode pipeline as files before storing them.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use json_model::{AnyModel, JsonField, Mapper, Model, ModelKind, Value};

use crate::cipher::Encryptor;
use crate::codec::{self, WriteOptions};
use crate::error::StoreError;

pub trait SettingsStore {
    /// Bytes stored under `key`, or `None` when the key is unset.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Removing an unset key is not an error.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as a file inside one directory.
///
/// Key characters outside `[A-Za-z0-9_-]` are written as `%XX` escapes, so
/// any key maps to a single plain file name.
#[derive(Debug, Clone)]
pub struct DirSettings {
    root: PathBuf,
}

impl DirSettings {
    /// The directory is created on the first `set`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> io::Result<PathBuf> {
        if key.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "settings key is empty"));
        }
        Ok(self.root.join(escape_key(key)))
    }
}

fn escape_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    name
}

impl SettingsStore for DirSettings {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(path, bytes)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(key)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Typed access to a [`SettingsStore`].
pub struct Settings<'r, S> {
    store: S,
    mapper: Mapper<'r>,
    encryptor: Option<Box<dyn Encryptor>>,
}

impl<'r, S: SettingsStore> Settings<'r, S> {
    pub fn new(store: S, mapper: Mapper<'r>) -> Self {
        Self {
            store,
            mapper,
            encryptor: None,
        }
    }

    /// Encrypts every stored value with `encryptor`.
    pub fn with_encryptor(mut self, encryptor: impl Encryptor + 'static) -> Self {
        self.encryptor = Some(Box::new(encryptor));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn get<T: Model>(&self, key: &str) -> Result<Option<T>, StoreError> {
        Ok(self.get_value(key)?.map(|value| self.mapper.decode_value(&value)))
    }

    /// Decodes the stored value as `kind`, for callers that only know the
    /// model type at runtime.
    pub fn get_with(&self, key: &str, kind: &'static ModelKind) -> Result<Option<Box<dyn AnyModel>>, StoreError> {
        let Some(value) = self.get_value(key)? else {
            return Ok(None);
        };
        let map = match value {
            Value::Object(map) => map,
            other => {
                log::debug!("setting `{key}` holds {other}, not an object; using defaults");
                Default::default()
            }
        };
        Ok(Some(kind.decode(&self.mapper, &map)))
    }

    pub fn get_value(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(bytes) = self.store.get(key)? else {
            log::debug!("setting `{key}` is unset");
            return Ok(None);
        };
        log::debug!("read setting `{key}` ({} bytes)", bytes.len());
        codec::from_bytes(&bytes, self.encryptor.as_deref()).map(Some)
    }

    pub fn set<F: JsonField>(&mut self, key: &str, value: &F) -> Result<(), StoreError> {
        let bytes = codec::to_bytes(&self.mapper, value, self.encryptor.as_deref(), &WriteOptions::default())?;
        self.store.set(key, &bytes)?;
        log::debug!("stored setting `{key}` ({} bytes)", bytes.len());
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)?;
        Ok(())
    }
}
