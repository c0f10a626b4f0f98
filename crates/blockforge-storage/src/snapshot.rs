//! Portable snapshot format for contract graphs.
//!
//! A snapshot is a versionless JSON document: the contract name plus an
//! ordered list of `{definitionId, instanceId, position}` records. Order is
//! load-bearing — the assembler emits blocks in insertion order, so a
//! round-trip must preserve it.
//!
//! Reading is deliberately lenient. Unknown extra keys are ignored
//! (forward tolerance); an entry missing or mangling any required key
//! (`definitionId`, `instanceId`, `position`) is skipped with a warning.
//! Only an unreadable document fails outright.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use blockforge_core::{
    BlockCatalog, BlockInstance, ContractGraph, DefinitionId, InstanceId, Position,
};

use crate::error::SnapshotError;

/// One exported block placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub definition_id: DefinitionId,
    pub instance_id: InstanceId,
    pub position: Position,
}

/// The portable serialized form of a contract graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub contract_name: String,
    pub blocks: Vec<SnapshotEntry>,
}

/// Exports `graph` into a snapshot, preserving insertion order.
pub fn export_graph(graph: &ContractGraph) -> Snapshot {
    Snapshot {
        contract_name: graph.name().to_string(),
        blocks: graph
            .instances()
            .map(|instance| SnapshotEntry {
                definition_id: instance.definition_id.clone(),
                instance_id: instance.instance_id.clone(),
                position: instance.position,
            })
            .collect(),
    }
}

/// Reads a snapshot document leniently.
///
/// Returns the snapshot plus warnings for every entry that had to be skipped
/// or repaired. Fails only when the document itself is unreadable.
pub fn parse_snapshot(json: &str) -> Result<(Snapshot, Vec<String>), SnapshotError> {
    let root: Value = serde_json::from_str(json)?;
    let obj = root.as_object().ok_or(SnapshotError::NotAnObject)?;

    let mut warnings = Vec::new();

    let contract_name = match obj.get("contractName") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            warnings.push("contractName is not a string; using an empty name".to_string());
            String::new()
        }
        None => {
            warnings.push("contractName is missing; using an empty name".to_string());
            String::new()
        }
    };

    let mut blocks = Vec::new();
    match obj.get("blocks") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                match entry_from_value(entry, index, &mut warnings) {
                    Some(parsed) => blocks.push(parsed),
                    None => {} // warned inside
                }
            }
        }
        Some(_) => warnings.push("blocks is not an array; importing no blocks".to_string()),
        None => warnings.push("blocks is missing; importing no blocks".to_string()),
    }

    Ok((
        Snapshot {
            contract_name,
            blocks,
        },
        warnings,
    ))
}

/// Parses one entry. `None` means the entry was skipped (and warned about).
fn entry_from_value(
    value: &Value,
    index: usize,
    warnings: &mut Vec<String>,
) -> Option<SnapshotEntry> {
    let Some(obj) = value.as_object() else {
        warnings.push(format!("block entry {} is not an object; skipped", index));
        return None;
    };

    let Some(definition_id) = obj.get("definitionId").and_then(Value::as_str) else {
        warnings.push(format!(
            "block entry {} is missing 'definitionId'; skipped",
            index
        ));
        return None;
    };
    let Some(instance_id) = obj.get("instanceId").and_then(Value::as_str) else {
        warnings.push(format!(
            "block entry {} is missing 'instanceId'; skipped",
            index
        ));
        return None;
    };

    let Some(pos) = obj.get("position") else {
        warnings.push(format!(
            "block entry {} is missing 'position'; skipped",
            index
        ));
        return None;
    };
    let x = pos.get("x").and_then(Value::as_f64);
    let y = pos.get("y").and_then(Value::as_f64);
    let (Some(x), Some(y)) = (x, y) else {
        warnings.push(format!(
            "block entry {} has a malformed 'position'; skipped",
            index
        ));
        return None;
    };
    let position = Position::new(x, y);

    Some(SnapshotEntry {
        definition_id: DefinitionId::new(definition_id),
        instance_id: InstanceId::new(instance_id),
        position,
    })
}

/// Builds a graph from a snapshot.
///
/// Entries whose `definitionId` does not resolve in `catalog`, and entries
/// duplicating an already-imported `instanceId`, are dropped with a warning;
/// everything else imports in order. Never fails.
pub fn import_graph(snapshot: &Snapshot, catalog: &BlockCatalog) -> (ContractGraph, Vec<String>) {
    let mut graph = ContractGraph::new(snapshot.contract_name.clone());
    let mut warnings = Vec::new();

    for entry in &snapshot.blocks {
        if !catalog.contains(&entry.definition_id) {
            warnings.push(format!(
                "block '{}' references unknown definition '{}'; dropped",
                entry.instance_id, entry.definition_id
            ));
            continue;
        }
        let instance = BlockInstance {
            instance_id: entry.instance_id.clone(),
            definition_id: entry.definition_id.clone(),
            position: entry.position,
        };
        if graph.insert_instance(instance).is_err() {
            warnings.push(format!(
                "duplicate instance id '{}'; dropped",
                entry.instance_id
            ));
        }
    }

    (graph, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_preserves_name_and_order() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        let a = graph
            .add_block(&catalog, DefinitionId::new("balances"), Position::new(1.0, 2.0))
            .unwrap();
        let b = graph
            .add_block(&catalog, DefinitionId::new("transfer"), Position::new(3.0, 4.0))
            .unwrap();

        let snapshot = export_graph(&graph);
        assert_eq!(snapshot.contract_name, "Token");
        assert_eq!(snapshot.blocks.len(), 2);
        assert_eq!(snapshot.blocks[0].instance_id, a);
        assert_eq!(snapshot.blocks[1].instance_id, b);
        assert_eq!(snapshot.blocks[1].position, Position::new(3.0, 4.0));
    }

    #[test]
    fn snapshot_json_uses_camel_case_keys() {
        let snapshot = Snapshot {
            contract_name: "Token".to_string(),
            blocks: vec![SnapshotEntry {
                definition_id: DefinitionId::new("mint"),
                instance_id: InstanceId::new("blk-0"),
                position: Position::new(5.0, 6.0),
            }],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["contractName"], "Token");
        assert_eq!(json["blocks"][0]["definitionId"], "mint");
        assert_eq!(json["blocks"][0]["instanceId"], "blk-0");
        assert_eq!(json["blocks"][0]["position"]["x"], 5.0);
    }

    #[test]
    fn parse_ignores_unknown_extra_keys() {
        let json = r#"{
            "contractName": "Token",
            "formatVersion": 9,
            "blocks": [
                {
                    "definitionId": "mint",
                    "instanceId": "blk-0",
                    "position": {"x": 1.0, "y": 2.0},
                    "selected": true
                }
            ]
        }"#;
        let (snapshot, warnings) = parse_snapshot(json).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(snapshot.blocks.len(), 1);
    }

    #[test]
    fn parse_skips_entries_missing_required_keys() {
        let json = r#"{
            "contractName": "Token",
            "blocks": [
                {"instanceId": "blk-0", "position": {"x": 0, "y": 0}},
                {"definitionId": "mint", "position": {"x": 0, "y": 0}},
                42,
                {"definitionId": "burn", "instanceId": "blk-1", "position": {"x": 0, "y": 0}}
            ]
        }"#;
        let (snapshot, warnings) = parse_snapshot(json).unwrap();
        assert_eq!(snapshot.blocks.len(), 1);
        assert_eq!(snapshot.blocks[0].instance_id, InstanceId::new("blk-1"));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn parse_skips_entries_with_missing_or_malformed_position() {
        let json = r#"{
            "contractName": "Token",
            "blocks": [
                {"definitionId": "mint", "instanceId": "blk-0"},
                {"definitionId": "burn", "instanceId": "blk-1", "position": {"x": "left"}},
                {"definitionId": "balances", "instanceId": "blk-2", "position": {"x": 1.0, "y": 2.0}}
            ]
        }"#;
        let (snapshot, warnings) = parse_snapshot(json).unwrap();
        assert_eq!(snapshot.blocks.len(), 1);
        assert_eq!(snapshot.blocks[0].instance_id, InstanceId::new("blk-2"));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("missing 'position'"));
        assert!(warnings[1].contains("malformed 'position'"));
    }

    #[test]
    fn parse_rejects_unreadable_documents() {
        assert!(matches!(
            parse_snapshot("not json"),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            parse_snapshot("[1, 2, 3]"),
            Err(SnapshotError::NotAnObject)
        ));
    }

    #[test]
    fn import_drops_unknown_definitions_and_keeps_the_rest() {
        let catalog = BlockCatalog::builtin();
        let snapshot = Snapshot {
            contract_name: "Token".to_string(),
            blocks: vec![
                SnapshotEntry {
                    definition_id: DefinitionId::new("balances"),
                    instance_id: InstanceId::new("a"),
                    position: Position::default(),
                },
                SnapshotEntry {
                    definition_id: DefinitionId::new("xyz"),
                    instance_id: InstanceId::new("b"),
                    position: Position::default(),
                },
                SnapshotEntry {
                    definition_id: DefinitionId::new("mint"),
                    instance_id: InstanceId::new("c"),
                    position: Position::default(),
                },
            ],
        };

        let (graph, warnings) = import_graph(&snapshot, &catalog);
        assert_eq!(graph.len(), 2);
        assert!(graph.get(&InstanceId::new("b")).is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("xyz"));
    }

    #[test]
    fn import_drops_duplicate_instance_ids() {
        let catalog = BlockCatalog::builtin();
        let entry = SnapshotEntry {
            definition_id: DefinitionId::new("balances"),
            instance_id: InstanceId::new("dup"),
            position: Position::default(),
        };
        let snapshot = Snapshot {
            contract_name: "Token".to_string(),
            blocks: vec![entry.clone(), entry],
        };

        let (graph, warnings) = import_graph(&snapshot, &catalog);
        assert_eq!(graph.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("duplicate"));
    }
}
