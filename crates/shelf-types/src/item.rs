use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// The user-supplied content of an item.
///
/// Callers are expected to hand stores only validated fields; the store
/// persists them as given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
}

impl ItemFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A stored item document.
///
/// Serializes flat: `{"id": "...", "name": "...", "description": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(flatten)]
    pub fields: ItemFields,
}

impl Item {
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serializes_flat() {
        let id = ItemId::from([0x0f; 12]);
        let item = Item::new(id, ItemFields::new("Widget", "A thing"));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "0f0f0f0f0f0f0f0f0f0f0f0f",
                "name": "Widget",
                "description": "A thing",
            })
        );
    }

    #[test]
    fn item_deserializes_from_flat_document() {
        let doc = json!({
            "id": "0102030405060708090a0b0c",
            "name": "Lamp",
            "description": "Bright",
        });
        let item: Item = serde_json::from_value(doc).unwrap();
        assert_eq!(item.id.as_bytes()[11], 0x0c);
        assert_eq!(item.name(), "Lamp");
        assert_eq!(item.description(), "Bright");
    }
}
