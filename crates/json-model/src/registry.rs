//! Schema registry: per-model rename maps, ignore sets and decoder maps.
//!
//! Configuration is keyed by [`ModelKind`] and looked up through the kind's
//! ancestry, so a model without its own rename map (say) uses the one set on
//! the nearest ancestor that has one. Each of the three maps resolves
//! independently; setting a map on a child replaces the inherited one rather
//! than merging with it.
//!
//! The registry is cheap to clone and safe to share between threads. Reads
//! take a shared lock, so models can be reconfigured while other threads
//! decode. Configuration is resolved once per model visited, so a change
//! made while a pass is running can apply to the nested models it has not
//! reached yet.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::kind::ModelKind;

/// A bidirectional JSON-key ↔ property-name association.
///
/// Keys and values are expected to be unique; when they are not, the entry
/// inserted last wins in each direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    to_property: HashMap<String, String>,
    to_key: HashMap<String, String>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, json_key: impl Into<String>, property: impl Into<String>) {
        let json_key = json_key.into();
        let property = property.into();
        self.to_key.insert(property.clone(), json_key.clone());
        self.to_property.insert(json_key, property);
    }

    pub fn property_for(&self, json_key: &str) -> Option<&str> {
        self.to_property.get(json_key).map(String::as_str)
    }

    pub fn key_for(&self, property: &str) -> Option<&str> {
        self.to_key.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.to_property.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_property.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (json_key, property) in iter {
            map.insert(json_key, property);
        }
        map
    }
}

pub type DecoderMap = HashMap<String, &'static ModelKind>;

#[derive(Debug, Default, Clone)]
struct TypeConfig {
    rename: Option<Arc<RenameMap>>,
    ignore: Option<Arc<HashSet<String>>>,
    decoders: Option<Arc<DecoderMap>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    types: HashMap<TypeId, TypeConfig>,
}

/// Process-wide or injectable store of per-model schema configuration.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    // The maps are replaced wholesale under the write lock, so a panic while
    // holding it cannot leave a half-written entry behind.
    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the rename map (`json key -> property name`) of `kind`.
    pub fn set_rename<I, K, V>(&self, kind: &'static ModelKind, map: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: RenameMap = map.into_iter().collect();
        log::debug!("{kind}: rename map set ({} entries)", map.len());
        self.write()
            .types
            .entry(kind.type_id())
            .or_default()
            .rename = Some(Arc::new(map));
    }

    /// Replaces the set of properties `kind` leaves out when encoding.
    pub fn set_ignore<I, S>(&self, kind: &'static ModelKind, properties: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = properties.into_iter().map(Into::into).collect();
        log::debug!("{kind}: ignore set set ({} entries)", set.len());
        self.write()
            .types
            .entry(kind.type_id())
            .or_default()
            .ignore = Some(Arc::new(set));
    }

    /// Replaces the decoder map (`property name -> element model`) of `kind`.
    pub fn set_decoders<I, K>(&self, kind: &'static ModelKind, decoders: I)
    where
        I: IntoIterator<Item = (K, &'static ModelKind)>,
        K: Into<String>,
    {
        let map: DecoderMap = decoders
            .into_iter()
            .map(|(property, element)| (property.into(), element))
            .collect();
        log::debug!("{kind}: decoder map set ({} entries)", map.len());
        self.write()
            .types
            .entry(kind.type_id())
            .or_default()
            .decoders = Some(Arc::new(map));
    }

    /// Drops every map configured directly on `kind`; inherited
    /// configuration applies again afterwards.
    pub fn clear(&self, kind: &'static ModelKind) {
        self.write().types.remove(&kind.type_id());
    }

    /// The configuration in effect for `kind`, resolved through its ancestry.
    pub fn snapshot(&self, kind: &'static ModelKind) -> SchemaConfig {
        let inner = self.read();
        let mut resolved = SchemaConfig::default();
        for ancestor in kind.ancestry() {
            let Some(config) = inner.types.get(&ancestor.type_id()) else {
                continue;
            };
            if resolved.rename.is_none() {
                resolved.rename.clone_from(&config.rename);
            }
            if resolved.ignore.is_none() {
                resolved.ignore.clone_from(&config.ignore);
            }
            if resolved.decoders.is_none() {
                resolved.decoders.clone_from(&config.decoders);
            }
        }
        resolved
    }

    /// Property name for `json_key`, or `json_key` itself when not renamed.
    pub fn property_name(&self, kind: &'static ModelKind, json_key: &str) -> String {
        self.snapshot(kind).property_name(json_key).into_owned()
    }

    /// JSON key for `property`, or `property` itself when not renamed.
    pub fn json_key(&self, kind: &'static ModelKind, property: &str) -> String {
        self.snapshot(kind).json_key(property).into_owned()
    }

    pub fn is_ignored(&self, kind: &'static ModelKind, property: &str) -> bool {
        self.snapshot(kind).is_ignored(property)
    }

    /// Element model registered for the list property `property`.
    pub fn decoder(&self, kind: &'static ModelKind, property: &str) -> Option<&'static ModelKind> {
        self.snapshot(kind).decoder(property)
    }
}

/// Resolved configuration of one model type. Missing maps behave as empty.
#[derive(Debug, Clone, Default)]
pub struct SchemaConfig {
    rename: Option<Arc<RenameMap>>,
    ignore: Option<Arc<HashSet<String>>>,
    decoders: Option<Arc<DecoderMap>>,
}

impl SchemaConfig {
    pub fn property_name<'k>(&self, json_key: &'k str) -> Cow<'k, str> {
        match self.rename.as_deref().and_then(|map| map.property_for(json_key)) {
            Some(property) => Cow::Owned(property.to_string()),
            None => Cow::Borrowed(json_key),
        }
    }

    pub fn json_key<'p>(&self, property: &'p str) -> Cow<'p, str> {
        match self.rename.as_deref().and_then(|map| map.key_for(property)) {
            Some(json_key) => Cow::Owned(json_key.to_string()),
            None => Cow::Borrowed(property),
        }
    }

    pub fn is_ignored(&self, property: &str) -> bool {
        self.ignore
            .as_deref()
            .is_some_and(|ignore| ignore.contains(property))
    }

    pub fn decoder(&self, property: &str) -> Option<&'static ModelKind> {
        self.decoders
            .as_deref()
            .and_then(|decoders| decoders.get(property).copied())
    }
}
