//! Static validation for contract graphs.
//!
//! [`validate`] scans a whole graph against the catalog and reports ALL
//! findings at once. It is pure — reads the graph, modifies nothing — and it
//! always runs to completion: validation can flag problems but can never
//! fail, because the assembler generates best-effort code for any graph.

pub mod issue;
pub mod rules;

pub use issue::{Severity, ValidationIssue};

use blockforge_core::{BlockCatalog, ContractGraph};

/// Validates `graph` against `catalog`, returning every issue found.
///
/// Rules run in a fixed order (empty graph, missing dependencies, duplicate
/// constructors, unresolved definitions) so issue ordering is stable for a
/// given graph.
pub fn validate(graph: &ContractGraph, catalog: &BlockCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    rules::check_empty(graph, &mut issues);
    rules::check_dependencies(graph, catalog, &mut issues);
    rules::check_duplicate_constructor(graph, catalog, &mut issues);
    rules::check_unresolved(graph, catalog, &mut issues);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockforge_core::{
        BlockCatalog, BlockInstance, ContractGraph, DefinitionId, InstanceId, Position,
    };

    fn add(graph: &mut ContractGraph, catalog: &BlockCatalog, id: &str) -> InstanceId {
        graph
            .add_block(catalog, DefinitionId::new(id), Position::default())
            .unwrap()
    }

    #[test]
    fn empty_graph_yields_single_warning_and_no_errors() {
        let catalog = BlockCatalog::builtin();
        let graph = ContractGraph::new("Empty");
        let issues = validate(&graph, &catalog);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_warning());
    }

    #[test]
    fn transfer_without_balances_warns_but_is_not_fatal() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        let transfer = add(&mut graph, &catalog, "transfer");

        let issues = validate(&graph, &catalog);
        assert!(issues.iter().all(|i| i.is_warning()));
        // transfer requires both balances and the transfer event
        let related: Vec<_> = issues
            .iter()
            .filter(|i| i.related_instance_id.as_ref() == Some(&transfer))
            .collect();
        assert_eq!(related.len(), 2);
    }

    #[test]
    fn satisfied_dependencies_do_not_warn() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        add(&mut graph, &catalog, "balances");
        add(&mut graph, &catalog, "transfer-event");
        add(&mut graph, &catalog, "transfer");

        let issues = validate(&graph, &catalog);
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn duplicate_dependents_warn_once_per_missing_pair() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        add(&mut graph, &catalog, "transfer");
        add(&mut graph, &catalog, "transfer");

        let issues = validate(&graph, &catalog);
        // balances + transfer-event missing, reported once each
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn second_constructor_warns_and_names_the_winner() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        let first = add(&mut graph, &catalog, "init-constructor");
        let second = add(&mut graph, &catalog, "init-constructor");

        let issues = validate(&graph, &catalog);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].related_instance_id.as_ref(), Some(&second));
        assert!(issues[0].message.contains(first.as_str()));
    }

    #[test]
    fn unresolved_definition_warns_with_related_instance() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        graph
            .insert_instance(BlockInstance {
                instance_id: InstanceId::new("stale-1"),
                definition_id: DefinitionId::new("xyz"),
                position: Position::default(),
            })
            .unwrap();

        let issues = validate(&graph, &catalog);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_warning());
        assert_eq!(
            issues[0].related_instance_id,
            Some(InstanceId::new("stale-1"))
        );
    }

    #[test]
    fn validation_never_reports_errors_for_data_quality() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        add(&mut graph, &catalog, "transfer");
        add(&mut graph, &catalog, "init-constructor");
        add(&mut graph, &catalog, "init-constructor");
        graph
            .insert_instance(BlockInstance {
                instance_id: InstanceId::new("stale-1"),
                definition_id: DefinitionId::new("xyz"),
                position: Position::default(),
            })
            .unwrap();

        let issues = validate(&graph, &catalog);
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.is_warning()));
    }
}
