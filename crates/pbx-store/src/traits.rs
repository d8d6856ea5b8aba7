use pbx_types::{Isa, ObjectId};

use crate::error::StoreResult;
use crate::object::Record;

/// Read-only, identifier-keyed record store.
///
/// All implementations must satisfy these invariants:
/// - The store is immutable once constructed; concurrent reads are safe.
/// - An identifier that does not resolve fails with
///   [`StoreError::NotFound`](crate::StoreError::NotFound),
///   never a default record.
/// - The store never interprets record contents beyond the `isa` field.
pub trait ObjectStore: Send + Sync {
    /// Resolve an identifier to its record.
    fn get(&self, id: &ObjectId) -> StoreResult<&Record>;

    /// Check whether an identifier resolves.
    fn contains(&self, id: &ObjectId) -> bool;

    /// All identifiers, in a stable order.
    fn ids(&self) -> Vec<&ObjectId>;

    /// Number of records.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers of every record whose `isa` equals `isa`, in id order.
    ///
    /// Records without an `isa` field match nothing. An `isa` of the wrong
    /// shape is still a [`StoreError::TypeMismatch`](crate::StoreError::TypeMismatch).
    fn ids_with_isa(&self, isa: Isa) -> StoreResult<Vec<&ObjectId>> {
        let mut matches = Vec::new();
        for id in self.ids() {
            if self.get(id)?.optional_string("isa")? == Some(isa.as_str()) {
                matches.push(id);
            }
        }
        Ok(matches)
    }

    /// Resolve an identifier and read the record's `isa` tag in one step.
    fn get_with_isa(&self, id: &ObjectId) -> StoreResult<(&Record, &str)> {
        let record = self.get(id)?;
        let isa = record.isa()?;
        Ok((record, isa))
    }
}

