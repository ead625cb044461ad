//! Attribute value types: extension values and small enumerations.

use std::collections::BTreeMap;
use std::fmt;

/// Free-form extension properties attached to an entity or event.
///
/// Keys render in sorted order.
pub type Extensions = BTreeMap<String, ExtensionValue>;

/// A JSON-compatible extension value.
///
/// Null is not representable; leave the key out instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionValue {
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point. Non-finite values render as JSON `null`.
    Float(f64),
    Text(String),
    Array(Vec<ExtensionValue>),
    Object(BTreeMap<String, ExtensionValue>),
}

impl ExtensionValue {
    /// Converts to a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            ExtensionValue::Bool(b) => Json::Bool(*b),
            ExtensionValue::Int(i) => Json::from(*i),
            ExtensionValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            ExtensionValue::Text(s) => Json::String(s.clone()),
            ExtensionValue::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            ExtensionValue::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for ExtensionValue {
    fn from(v: bool) -> Self {
        ExtensionValue::Bool(v)
    }
}

impl From<i64> for ExtensionValue {
    fn from(v: i64) -> Self {
        ExtensionValue::Int(v)
    }
}

impl From<i32> for ExtensionValue {
    fn from(v: i32) -> Self {
        ExtensionValue::Int(v.into())
    }
}

impl From<u32> for ExtensionValue {
    fn from(v: u32) -> Self {
        ExtensionValue::Int(v.into())
    }
}

impl From<f64> for ExtensionValue {
    fn from(v: f64) -> Self {
        ExtensionValue::Float(v)
    }
}

impl From<&str> for ExtensionValue {
    fn from(v: &str) -> Self {
        ExtensionValue::Text(v.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(v: String) -> Self {
        ExtensionValue::Text(v)
    }
}

impl<T: Into<ExtensionValue>> From<Vec<T>> for ExtensionValue {
    fn from(v: Vec<T>) -> Self {
        ExtensionValue::Array(v.into_iter().map(Into::into).collect())
    }
}

/// Error converting a JSON value that has no extension representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("JSON null cannot be used as an extension value")]
pub struct NullExtensionValue;

impl TryFrom<serde_json::Value> for ExtensionValue {
    type Error = NullExtensionValue;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;
        Ok(match value {
            Json::Null => return Err(NullExtensionValue),
            Json::Bool(b) => ExtensionValue::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => ExtensionValue::Int(i),
                None => ExtensionValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => ExtensionValue::Text(s),
            Json::Array(items) => ExtensionValue::Array(
                items
                    .into_iter()
                    .map(ExtensionValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(map) => ExtensionValue::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, ExtensionValue::try_from(v)?)))
                    .collect::<Result<_, NullExtensionValue>>()?,
            ),
        })
    }
}

// =============================================================================
// Membership vocabularies
// =============================================================================

/// Role of a member within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Learner,
    Instructor,
    Mentor,
    TeachingAssistant,
    ContentDeveloper,
    Administrator,
    Manager,
    Member,
}

impl Role {
    /// Returns the vocabulary term.
    pub fn term(self) -> &'static str {
        match self {
            Role::Learner => "Learner",
            Role::Instructor => "Instructor",
            Role::Mentor => "Mentor",
            Role::TeachingAssistant => "TeachingAssistant",
            Role::ContentDeveloper => "ContentDeveloper",
            Role::Administrator => "Administrator",
            Role::Manager => "Manager",
            Role::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

/// Membership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    /// Returns the vocabulary term.
    pub fn term(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}
