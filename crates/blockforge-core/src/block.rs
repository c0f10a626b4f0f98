//! Catalog-side data model: block definitions and their metadata.
//!
//! A [`BlockDefinition`] is an immutable catalog entry describing one
//! reusable code-generating building block. Definitions are loaded once at
//! process start (see [`catalog`](crate::catalog)) and never mutated.

use serde::{Deserialize, Serialize};

use crate::id::DefinitionId;
use crate::lang::LocalizedText;

/// The five block kinds a contract graph can contain.
///
/// [`BlockType::ASSEMBLY_ORDER`] is the fixed section order the assembler
/// emits; it is load-bearing for output determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Variable,
    Event,
    Modifier,
    Constructor,
    Function,
}

impl BlockType {
    /// Fixed emission order: variable, event, modifier, constructor, function.
    pub const ASSEMBLY_ORDER: [BlockType; 5] = [
        BlockType::Variable,
        BlockType::Event,
        BlockType::Modifier,
        BlockType::Constructor,
        BlockType::Function,
    ];

    /// Lowercase wire tag, matching the serde representation.
    pub fn as_tag(self) -> &'static str {
        match self {
            BlockType::Variable => "variable",
            BlockType::Event => "event",
            BlockType::Modifier => "modifier",
            BlockType::Constructor => "constructor",
            BlockType::Function => "function",
        }
    }
}

/// Palette grouping for catalog consumers. Not codegen-relevant, but the
/// grouping view must be available from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Storage,
    Events,
    Access,
    Lifecycle,
    Token,
}

/// Solidity visibility keyword carried by some definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        }
    }
}

/// Solidity state-mutability keyword carried by some function definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    Payable,
}

impl Mutability {
    pub fn keyword(self) -> &'static str {
        match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Payable => "payable",
        }
    }
}

/// One declared parameter of a block (rendered verbatim into signatures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as it appears in the generated signature.
    pub name: String,
    /// Solidity type as it appears in the generated signature.
    #[serde(rename = "type")]
    pub param_type: String,
    /// Whether the palette requires the user to fill this parameter in.
    pub required: bool,
}

impl Parameter {
    pub fn required(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
        }
    }
}

/// Immutable catalog entry describing one reusable building block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Unique catalog key.
    pub id: DefinitionId,
    /// Which of the five declaration kinds this block emits.
    pub block_type: BlockType,
    /// Palette grouping.
    pub category: Category,
    /// Localized display title.
    pub title: LocalizedText,
    /// Localized description shown in the palette.
    pub description: LocalizedText,
    /// Parameters rendered verbatim into the generated signature.
    pub parameters: Vec<Parameter>,
    /// Visibility keyword, where the declaration kind carries one.
    pub visibility: Option<Visibility>,
    /// State-mutability keyword, for view/pure/payable functions.
    pub mutability: Option<Mutability>,
    /// Display color token for the canvas (UI metadata only).
    pub color: String,
    /// Companion definitions this block expects in the same graph.
    ///
    /// Drives the validator's dependency warnings; never blocks generation.
    pub requires: Vec<DefinitionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_order_is_fixed() {
        assert_eq!(
            BlockType::ASSEMBLY_ORDER,
            [
                BlockType::Variable,
                BlockType::Event,
                BlockType::Modifier,
                BlockType::Constructor,
                BlockType::Function,
            ]
        );
    }

    #[test]
    fn block_type_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&BlockType::Constructor).unwrap(),
            "\"constructor\""
        );
        let back: BlockType = serde_json::from_str("\"event\"").unwrap();
        assert_eq!(back, BlockType::Event);
    }

    #[test]
    fn parameter_serializes_type_field() {
        let param = Parameter::required("to", "address");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "address");
        assert_eq!(json["name"], "to");
        assert_eq!(json["required"], true);
    }
}
