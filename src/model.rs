//! Core data types: items, their ids, and the Work/Travel mode
//!
//! The serialized shape matches the storage layout used by the mobile
//! version of the app, so an exported `@toDos` value loads unchanged:
//!
//! ```text
//! { "1700000000000": { "text": "Buy milk", "working": true, "done": false } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which list an item belongs to, and which list is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Work,
    Travel,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Work, Mode::Travel];

    pub fn toggle(self) -> Self {
        match self {
            Mode::Work => Mode::Travel,
            Mode::Travel => Mode::Work,
        }
    }

    /// Stored items carry the mode as a `working` flag
    pub fn is_working(self) -> bool {
        matches!(self, Mode::Work)
    }

    pub fn from_working(working: bool) -> Self {
        if working {
            Mode::Work
        } else {
            Mode::Travel
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Travel => "Travel",
        }
    }

    /// Placeholder for the add field
    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Work => "Add a To Do",
            Mode::Travel => "Where do you wanna go?",
        }
    }

    /// Value written under the mode key
    pub fn as_stored(self) -> &'static str {
        if self.is_working() {
            "true"
        } else {
            "false"
        }
    }

    /// Only an explicit `"false"` selects Travel; anything else is Work.
    pub fn from_stored(value: &str) -> Self {
        Mode::from_working(value != "false")
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque item identifier, minted from the creation timestamp in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn from_millis(millis: u64) -> Self {
        ItemId(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The creation timestamp, when the id came from a clock reading
    pub fn millis(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

/// A single entry in one of the two lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    /// Fixed at creation
    #[serde(rename = "working", with = "working_flag")]
    pub mode: Mode,
    #[serde(default)]
    pub done: bool,
}

impl Item {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
            done: false,
        }
    }
}

mod working_flag {
    use super::Mode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mode: &Mode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(mode.is_working())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mode, D::Error> {
        bool::deserialize(deserializer).map(Mode::from_working)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Work.toggle(), Mode::Travel);
        assert_eq!(Mode::Travel.toggle(), Mode::Work);
    }

    #[test]
    fn test_mode_stored_values() {
        assert_eq!(Mode::Work.as_stored(), "true");
        assert_eq!(Mode::Travel.as_stored(), "false");
        assert_eq!(Mode::from_stored("false"), Mode::Travel);
        assert_eq!(Mode::from_stored("true"), Mode::Work);
        // No validation beyond presence
        assert_eq!(Mode::from_stored("garbage"), Mode::Work);
    }

    #[test]
    fn test_item_wire_format() {
        let item = Item::new("Paris", Mode::Travel);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Paris", "working": false, "done": false })
        );
    }

    #[test]
    fn test_item_parses_mobile_snapshot() {
        let item: Item =
            serde_json::from_str(r#"{"text":"Buy milk","working":true,"done":true}"#).unwrap();
        assert_eq!(item.mode, Mode::Work);
        assert!(item.done);
    }

    #[test]
    fn test_item_done_defaults_to_false() {
        let item: Item = serde_json::from_str(r#"{"text":"x","working":false}"#).unwrap();
        assert!(!item.done);
    }

    #[test]
    fn test_item_id_millis() {
        let id = ItemId::from_millis(1_700_000_000_000);
        assert_eq!(id.as_str(), "1700000000000");
        assert_eq!(id.millis(), Some(1_700_000_000_000));
        assert_eq!(ItemId::from("abc").millis(), None);
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in ms
        assert!(now_millis() > 1_577_836_800_000);
    }
}
