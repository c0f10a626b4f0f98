//! Stable ID newtypes for catalog and graph entities.
//!
//! Both IDs are distinct newtype wrappers over `String`, providing type
//! safety so that a `DefinitionId` cannot be accidentally used where an
//! `InstanceId` is expected. Snapshots and remote-backend payloads carry
//! them as plain JSON strings (`#[serde(transparent)]`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a [`BlockDefinition`](crate::block::BlockDefinition) in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(pub String);

/// Identity of a block placement within one contract graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl DefinitionId {
    pub fn new(id: impl Into<String>) -> Self {
        DefinitionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        InstanceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for DefinitionId {
    fn from(s: &str) -> Self {
        DefinitionId(s.to_string())
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        InstanceId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(format!("{}", DefinitionId::new("total-supply")), "total-supply");
        assert_eq!(format!("{}", InstanceId::new("blk-3")), "blk-3");
    }

    #[test]
    fn serde_is_transparent() {
        let id = DefinitionId::new("transfer");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"transfer\"");
        let back: DefinitionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_types_are_distinct() {
        // Same inner value, different types; this is a compile-time guarantee.
        let def = DefinitionId::new("x");
        let inst = InstanceId::new("x");
        assert_eq!(def.as_str(), inst.as_str());
    }
}
