pub mod block;
pub mod catalog;
pub mod error;
pub mod graph;
pub mod id;
pub mod lang;

// Re-export commonly used types
pub use block::{BlockDefinition, BlockType, Category, Mutability, Parameter, Visibility};
pub use catalog::BlockCatalog;
pub use error::CoreError;
pub use graph::{BlockInstance, ContractGraph, Position};
pub use id::{DefinitionId, InstanceId};
pub use lang::{Language, LocalizedText};
