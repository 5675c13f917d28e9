//! Manifest document and build mode types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which host phase the manifest is being built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("Unknown mode '{}'", other)),
        }
    }
}

/// Context handed to a manifest transform alongside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    pub mode: Mode,
}

/// The generated manifest document
///
/// An insertion-ordered JSON object; members serialize in the order they were
/// added. Replacing an existing member keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn new() -> Self {
        Manifest(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// String value of a member, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a member, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `icons` member as a slice (empty if absent or not an array)
    pub fn icons(&self) -> &[Value] {
        self.0
            .get("icons")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any icon's `purpose` contains the `maskable` token
    pub fn has_maskable_icon(&self) -> bool {
        self.icons().iter().any(|icon| {
            icon.get("purpose")
                .and_then(Value::as_str)
                .is_some_and(|purpose| purpose.split_whitespace().any(|t| t == "maskable"))
        })
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Manifest(map)
    }
}

impl From<Manifest> for Value {
    fn from(manifest: Manifest) -> Self {
        Value::Object(manifest.0)
    }
}
