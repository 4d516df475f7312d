//! Local-variable slots and tables.

use serde::{Deserialize, Serialize};

use crate::names::TypeRef;

/// A typed local-variable slot. A slot's index is its position in the
/// owning [`VariableTable`]; indices are 0-based, contiguous, and
/// order-significant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSlot {
    pub ty: TypeRef,
}

impl LocalSlot {
    pub fn new(ty: TypeRef) -> Self {
        Self { ty }
    }
}

/// An ordered table of local-variable slots.
///
/// Slot 0 may be reserved for the method's return value; whether it is
/// reserved is recorded on the method body, not here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTable(Vec<LocalSlot>);

impl VariableTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one slot at the tail.
    pub fn push(&mut self, slot: LocalSlot) {
        self.0.push(slot);
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table holds no slots.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The slot at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&LocalSlot> {
        self.0.get(index)
    }

    /// Iterate over the slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocalSlot> {
        self.0.iter()
    }

    /// Pull slot 0 out of the table, returning it together with the
    /// remaining slots (which shift down by one position).
    pub fn split_first(mut self) -> (Option<LocalSlot>, Self) {
        if self.0.is_empty() {
            (None, self)
        } else {
            let first = self.0.remove(0);
            (Some(first), self)
        }
    }

    /// Append every slot of `other`, consuming both tables.
    pub fn concat(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Vec<LocalSlot>> for VariableTable {
    fn from(slots: Vec<LocalSlot>) -> Self {
        Self(slots)
    }
}

impl FromIterator<LocalSlot> for VariableTable {
    fn from_iter<T: IntoIterator<Item = LocalSlot>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for VariableTable {
    type Item = LocalSlot;
    type IntoIter = std::vec::IntoIter<LocalSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariableTable {
    type Item = &'a LocalSlot;
    type IntoIter = std::slice::Iter<'a, LocalSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
