use std::collections::BTreeMap;

use pbx_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::{Record, Value};
use crate::traits::ObjectStore;

/// In-memory, `BTreeMap`-based object store.
///
/// Built once from decoded records and never mutated afterwards, so a shared
/// reference can be read from any number of threads without locking.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: BTreeMap<ObjectId, Record>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from identifier/record pairs.
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, Record)>,
        K: Into<ObjectId>,
    {
        Self {
            objects: records.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }

    /// Build a store from a decoded `objects` mapping.
    ///
    /// Every entry must itself be a dictionary; anything else is a
    /// [`StoreError::TypeMismatch`] keyed by the offending identifier.
    pub fn from_objects_json(objects: serde_json::Value) -> StoreResult<Self> {
        let serde_json::Value::Object(map) = objects else {
            return Err(StoreError::InvalidDocument(
                "objects is not a dictionary".into(),
            ));
        };

        let mut records = BTreeMap::new();
        for (id, raw) in map {
            match Value::from_json(raw) {
                Some(Value::Dict(record)) => {
                    records.insert(ObjectId::from(id), record);
                }
                Some(other) => {
                    return Err(StoreError::TypeMismatch {
                        key: id,
                        actual: other.to_string(),
                        expected: "a dictionary",
                    });
                }
                None => {}
            }
        }

        debug!(records = records.len(), "built object store");
        Ok(Self { objects: records })
    }

    /// Iterate over all records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Record)> {
        self.objects.iter()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get(&self, id: &ObjectId) -> StoreResult<&Record> {
        self.objects
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    fn ids(&self) -> Vec<&ObjectId> {
        self.objects.keys().collect()
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.objects.len())
            .finish()
    }
}
