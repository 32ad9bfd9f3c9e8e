//! Slot-based extension storage
//!
//! Slots are the file format's generic key/typed-value side table, attachable
//! to most entities. Applications store their own data here, so values with
//! types this crate does not model are carried through untouched and written
//! back exactly as read.

use serde::{Deserialize, Serialize};

use super::ids::Guid;
use super::numeric::FixedPoint;

/// A typed slot value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlotValue {
    /// `string` value
    Text(String),

    /// `integer` value
    Integer(i64),

    /// `numeric` value in the file's N/D form
    Numeric(FixedPoint),

    /// `guid` value
    Guid(Guid),

    /// `frame` value: a nested slot list
    Frame(Vec<Slot>),

    /// Any value type this crate does not interpret, preserved verbatim
    Other { value_type: String, text: String },
}

impl SlotValue {
    /// The file format's type tag for this value
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Text(_) => "string",
            Self::Integer(_) => "integer",
            Self::Numeric(_) => "numeric",
            Self::Guid(_) => "guid",
            Self::Frame(_) => "frame",
            Self::Other { value_type, .. } => value_type,
        }
    }

    /// The text form as written to the file (frames have none)
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Numeric(n) => Some(n.to_string()),
            Self::Guid(g) => Some(g.to_string()),
            Self::Frame(_) => None,
            Self::Other { text, .. } => Some(text.clone()),
        }
    }
}

/// A single key/value extension entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub key: String,
    pub value: SlotValue,
}

impl Slot {
    /// Create a slot
    pub fn new(key: impl Into<String>, value: SlotValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Create a string slot
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, SlotValue::Text(value.into()))
    }
}

/// Find a slot by key in a slot list
pub fn find_slot<'a>(slots: &'a [Slot], key: &str) -> Option<&'a SlotValue> {
    slots.iter().find(|s| s.key == key).map(|s| &s.value)
}

/// Insert or replace a slot by key
pub fn set_slot(slots: &mut Vec<Slot>, key: &str, value: SlotValue) {
    match slots.iter_mut().find(|s| s.key == key) {
        Some(slot) => slot.value = value,
        None => slots.push(Slot::new(key, value)),
    }
}
