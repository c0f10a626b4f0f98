//! ContractGraph: the mutable collection of block placements.
//!
//! [`ContractGraph`] is what the user assembles on the canvas: an
//! insertion-ordered set of [`BlockInstance`]s plus a contract-level name.
//! Insertion order is load-bearing — the assembler emits fragments within a
//! section in the order blocks were added, and snapshot round-trips must
//! preserve it — so instances live in an [`IndexMap`].
//!
//! The graph carries a monotonically increasing `revision` token, bumped by
//! every add/remove. Moves are UI-metadata-only and do NOT bump it: geometry
//! never affects generated code, so a move must never invalidate or reorder
//! an in-flight generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::BlockCatalog;
use crate::error::CoreError;
use crate::id::{DefinitionId, InstanceId};

/// Canvas position of a block. Pure UI metadata, irrelevant to codegen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// One placement of a block definition inside a contract graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInstance {
    pub instance_id: InstanceId,
    pub definition_id: DefinitionId,
    pub position: Position,
}

/// The full set of block instances a user has assembled, representing one
/// in-progress generated contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractGraph {
    name: String,
    instances: IndexMap<InstanceId, BlockInstance>,
    next_instance: u64,
    revision: u64,
}

impl ContractGraph {
    /// Creates an empty graph for one editing session.
    pub fn new(name: impl Into<String>) -> Self {
        ContractGraph {
            name: name.into(),
            instances: IndexMap::new(),
            next_instance: 0,
            revision: 0,
        }
    }

    /// Contract-level name, rendered into the `contract <name>` wrapper.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current revision token. Bumped by add/remove, never by move.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds a block, returning the new instance's id.
    ///
    /// Fails with [`CoreError::UnknownDefinition`] when the catalog cannot
    /// resolve `definition_id`. This is the one hard failure in the editing
    /// path: a direct user action with a bad id is a caller bug, unlike
    /// import, which tolerates stale ids. The graph is untouched on failure.
    pub fn add_block(
        &mut self,
        catalog: &BlockCatalog,
        definition_id: DefinitionId,
        position: Position,
    ) -> Result<InstanceId, CoreError> {
        if !catalog.contains(&definition_id) {
            return Err(CoreError::UnknownDefinition { id: definition_id });
        }

        let instance_id = self.fresh_instance_id();
        self.instances.insert(
            instance_id.clone(),
            BlockInstance {
                instance_id: instance_id.clone(),
                definition_id,
                position,
            },
        );
        self.revision += 1;
        Ok(instance_id)
    }

    /// Restores an instance verbatim, preserving its id. Used by snapshot
    /// import, which resolves definition ids itself (dropping unresolved
    /// entries with a warning rather than failing).
    pub fn insert_instance(&mut self, instance: BlockInstance) -> Result<(), CoreError> {
        if self.instances.contains_key(&instance.instance_id) {
            return Err(CoreError::DuplicateInstance {
                id: instance.instance_id,
            });
        }
        self.instances.insert(instance.instance_id.clone(), instance);
        self.revision += 1;
        Ok(())
    }

    /// Removes an instance. Returns `false` (no-op) if absent.
    pub fn remove_block(&mut self, instance_id: &InstanceId) -> bool {
        // shift_remove keeps the insertion order of the survivors.
        let removed = self.instances.shift_remove(instance_id).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Updates an instance's canvas position. Metadata-only: does not bump
    /// the revision and never invalidates generated output. Returns `false`
    /// if the instance is absent.
    pub fn move_block(&mut self, instance_id: &InstanceId, position: Position) -> bool {
        match self.instances.get_mut(instance_id) {
            Some(instance) => {
                instance.position = position;
                true
            }
            None => false,
        }
    }

    /// Discards all instances, resetting the workspace. The revision keeps
    /// increasing so in-flight generations against the old contents go stale.
    pub fn clear(&mut self) {
        if !self.instances.is_empty() {
            self.instances.clear();
            self.revision += 1;
        }
    }

    pub fn get(&self, instance_id: &InstanceId) -> Option<&BlockInstance> {
        self.instances.get(instance_id)
    }

    /// Instances in insertion order.
    pub fn instances(&self) -> impl Iterator<Item = &BlockInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Generates an instance id unused in this graph. Restored snapshots may
    /// contain arbitrary ids, so probe until free.
    fn fresh_instance_id(&mut self) -> InstanceId {
        loop {
            let candidate = InstanceId::new(format!("blk-{}", self.next_instance));
            self.next_instance += 1;
            if !self.instances.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BlockCatalog;

    fn catalog() -> BlockCatalog {
        BlockCatalog::builtin()
    }

    #[test]
    fn add_block_returns_unique_ids_and_bumps_revision() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        let a = graph
            .add_block(&catalog, DefinitionId::new("total-supply"), Position::default())
            .unwrap();
        let b = graph
            .add_block(&catalog, DefinitionId::new("balances"), Position::default())
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.revision(), 2);
    }

    #[test]
    fn add_block_with_unknown_definition_fails_and_leaves_graph_intact() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        let err = graph
            .add_block(&catalog, DefinitionId::new("no-such-block"), Position::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownDefinition { .. }));
        assert!(graph.is_empty());
        assert_eq!(graph.revision(), 0);
    }

    #[test]
    fn remove_block_is_noop_when_absent() {
        let mut graph = ContractGraph::new("MyToken");
        assert!(!graph.remove_block(&InstanceId::new("blk-0")));
        assert_eq!(graph.revision(), 0);
    }

    #[test]
    fn remove_preserves_insertion_order_of_survivors() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        let a = graph
            .add_block(&catalog, DefinitionId::new("total-supply"), Position::default())
            .unwrap();
        let b = graph
            .add_block(&catalog, DefinitionId::new("balances"), Position::default())
            .unwrap();
        let c = graph
            .add_block(&catalog, DefinitionId::new("transfer"), Position::default())
            .unwrap();
        assert!(graph.remove_block(&b));

        let order: Vec<_> = graph.instances().map(|i| i.instance_id.clone()).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn move_block_updates_position_without_bumping_revision() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        let id = graph
            .add_block(&catalog, DefinitionId::new("mint"), Position::new(1.0, 2.0))
            .unwrap();
        let rev = graph.revision();

        assert!(graph.move_block(&id, Position::new(30.0, 40.0)));
        assert_eq!(graph.revision(), rev);
        assert_eq!(graph.get(&id).unwrap().position, Position::new(30.0, 40.0));

        assert!(!graph.move_block(&InstanceId::new("missing"), Position::default()));
    }

    #[test]
    fn insert_instance_rejects_duplicates() {
        let mut graph = ContractGraph::new("MyToken");
        let instance = BlockInstance {
            instance_id: InstanceId::new("imported-1"),
            definition_id: DefinitionId::new("burn"),
            position: Position::default(),
        };
        graph.insert_instance(instance.clone()).unwrap();
        let err = graph.insert_instance(instance).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateInstance { .. }));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn fresh_ids_skip_restored_collisions() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        graph
            .insert_instance(BlockInstance {
                instance_id: InstanceId::new("blk-0"),
                definition_id: DefinitionId::new("burn"),
                position: Position::default(),
            })
            .unwrap();
        let id = graph
            .add_block(&catalog, DefinitionId::new("mint"), Position::default())
            .unwrap();
        assert_ne!(id, InstanceId::new("blk-0"));
    }

    #[test]
    fn clear_empties_graph_and_bumps_revision() {
        let catalog = catalog();
        let mut graph = ContractGraph::new("MyToken");
        graph
            .add_block(&catalog, DefinitionId::new("balances"), Position::default())
            .unwrap();
        let rev = graph.revision();
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.revision() > rev);

        // Clearing an already-empty graph is a no-op.
        let rev = graph.revision();
        graph.clear();
        assert_eq!(graph.revision(), rev);
    }
}
