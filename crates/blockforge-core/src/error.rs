//! Core error types for blockforge-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Deliberately
//! small: the generation and import paths tolerate bad data (warnings, not
//! errors), so only direct programming-contract violations surface here.

use crate::id::{DefinitionId, InstanceId};
use thiserror::Error;

/// Core errors produced by the blockforge-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `add_block` was called with a definition id the catalog cannot resolve.
    #[error("unknown block definition: '{id}'")]
    UnknownDefinition { id: DefinitionId },

    /// `insert_instance` was called with an instance id already in the graph.
    #[error("duplicate instance id: '{id}'")]
    DuplicateInstance { id: InstanceId },

    /// A language tag outside the two supported tokens.
    #[error("unsupported language tag: '{tag}' (expected 'en' or 'ru')")]
    UnsupportedLanguage { tag: String },
}
