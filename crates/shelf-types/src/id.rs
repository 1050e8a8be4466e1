use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of raw bytes in an [`ItemId`].
pub const ITEM_ID_LEN: usize = 12;

/// Storage-assigned identifier for a stored item.
///
/// The layout follows the familiar document-store object id: the first four
/// bytes hold the creation time in seconds since the Unix epoch (big-endian),
/// the remaining eight are random. The canonical text form is 24 lowercase
/// hex characters, which is also how the id appears in JSON.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId([u8; ITEM_ID_LEN]);

impl ItemId {
    /// Generate a fresh id stamped with the current time.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::with_timestamp(secs as u32)
    }

    /// Generate an id with an explicit timestamp and a random tail.
    pub fn with_timestamp(secs: u32) -> Self {
        let mut bytes = [0u8; ITEM_ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[4..]);
        Self(bytes)
    }

    /// Creation time embedded in the id, in seconds since the Unix epoch.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// The raw 12-byte value.
    pub fn as_bytes(&self) -> &[u8; ITEM_ID_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 24-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != ITEM_ID_LEN * 2 {
            return Err(TypeError::InvalidLength {
                expected: ITEM_ID_LEN * 2,
                actual: s.len(),
            });
        }
        let mut arr = [0u8; ITEM_ID_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.to_hex())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ItemId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_hex()
    }
}

impl From<[u8; ITEM_ID_LEN]> for ItemId {
    fn from(bytes: [u8; ITEM_ID_LEN]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn timestamp_is_embedded() {
        let id = ItemId::with_timestamp(1_700_000_000);
        assert_eq!(id.timestamp(), 1_700_000_000);
        assert_eq!(&id.to_hex()[..8], "6553f100");
    }

    #[test]
    fn display_is_24_lowercase_hex() {
        let id = ItemId::from([0xab; ITEM_ID_LEN]);
        let display = format!("{id}");
        assert_eq!(display.len(), 24);
        assert_eq!(display, "abababababababababababab");
    }

    #[test]
    fn parse_accepts_uppercase() {
        let id: ItemId = "ABABABABABABABABABABABAB".parse().unwrap();
        assert_eq!(id, ItemId::from([0xab; ITEM_ID_LEN]));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = ItemId::from_hex("1234").unwrap_err();
        assert_eq!(err, TypeError::InvalidLength { expected: 24, actual: 4 });
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = ItemId::from_hex("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn serializes_as_json_string() {
        let id = ItemId::from([0x01; ITEM_ID_LEN]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"010101010101010101010101\"");
        let parsed: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn deserialize_rejects_malformed_string() {
        let parsed: Result<ItemId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(parsed.is_err());
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = ItemId::from_hex(&s);
        }

        #[test]
        fn any_24_hex_chars_parse(s in "[0-9a-f]{24}") {
            let id = ItemId::from_hex(&s).unwrap();
            prop_assert_eq!(id.to_hex(), s);
        }
    }
}
