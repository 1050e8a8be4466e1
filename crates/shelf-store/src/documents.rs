use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shelf_types::{Item, ItemFields, ItemId};

/// Insertion-ordered collection of item documents.
///
/// Shared by every backend; backends add locking and persistence on top.
#[derive(Clone, Debug, Default)]
pub struct Documents {
    items: IndexMap<ItemId, ItemFields>,
}

/// On-disk form of a [`Documents`] collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Documents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from a snapshot. Duplicate ids are rejected.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ItemId> {
        let mut items = IndexMap::with_capacity(snapshot.items.len());
        for item in snapshot.items {
            if items.insert(item.id, item.fields).is_some() {
                return Err(item.id);
            }
        }
        Ok(Self { items })
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot { items: self.list() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert under a freshly generated id.
    pub fn insert(&mut self, fields: ItemFields) -> Item {
        let mut id = ItemId::generate();
        while self.items.contains_key(&id) {
            id = ItemId::generate();
        }
        self.items.insert(id, fields.clone());
        Item::new(id, fields)
    }

    pub fn list(&self) -> Vec<Item> {
        self.items
            .iter()
            .map(|(id, fields)| Item::new(*id, fields.clone()))
            .collect()
    }

    pub fn get(&self, id: &ItemId) -> Option<Item> {
        self.items.get(id).map(|fields| Item::new(*id, fields.clone()))
    }

    /// Replace fields in place. Returns the previous fields alongside the
    /// updated item so callers can roll back.
    pub fn replace(&mut self, id: &ItemId, fields: ItemFields) -> Option<(Item, ItemFields)> {
        let slot = self.items.get_mut(id)?;
        let previous = std::mem::replace(slot, fields.clone());
        Some((Item::new(*id, fields), previous))
    }

    /// Remove a document, returning it with its former position.
    pub fn remove(&mut self, id: &ItemId) -> Option<(usize, Item)> {
        let (index, id, fields) = self.items.shift_remove_full(id)?;
        Some((index, Item::new(id, fields)))
    }

    /// Undo an `insert`.
    pub(crate) fn forget(&mut self, id: &ItemId) {
        self.items.shift_remove(id);
    }

    /// Undo a `replace`.
    pub(crate) fn restore(&mut self, id: &ItemId, previous: ItemFields) {
        if let Some(slot) = self.items.get_mut(id) {
            *slot = previous;
        }
    }

    /// Undo a `remove`.
    pub(crate) fn reinsert(&mut self, index: usize, item: Item) {
        self.items.shift_insert(index, item.id, item.fields);
    }
}
