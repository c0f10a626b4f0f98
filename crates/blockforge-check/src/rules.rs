//! Individual validation rules.
//!
//! Each rule is a pure function appending issues to the shared list. Rules
//! never fail and never stop the scan: every problem the validator can name
//! is a warning, because generation must always proceed best-effort.

use std::collections::HashSet;

use blockforge_core::{BlockCatalog, BlockType, ContractGraph, Language};

use crate::issue::ValidationIssue;

/// Rule 1: an empty graph gets exactly one warning, never an error.
pub fn check_empty(graph: &ContractGraph, issues: &mut Vec<ValidationIssue>) {
    if graph.is_empty() {
        issues.push(ValidationIssue::warning(
            "the workspace is empty: add blocks to generate code",
        ));
    }
}

/// Rule 2: dependency pairs. A block whose definition `requires` companion
/// definitions warns for each companion with no instance in the graph.
pub fn check_dependencies(
    graph: &ContractGraph,
    catalog: &BlockCatalog,
    issues: &mut Vec<ValidationIssue>,
) {
    let present: HashSet<_> = graph
        .instances()
        .map(|instance| instance.definition_id.clone())
        .collect();

    // One warning per (dependent definition, missing companion) pair, not
    // per instance, so stacking five transfer blocks does not warn five times.
    let mut reported = HashSet::new();

    for instance in graph.instances() {
        let Some(def) = catalog.lookup(&instance.definition_id) else {
            continue; // rule 4 covers unresolved ids
        };
        for required in &def.requires {
            if present.contains(required) {
                continue;
            }
            if !reported.insert((def.id.clone(), required.clone())) {
                continue;
            }
            let required_title = catalog
                .lookup(required)
                .map(|d| d.title.get(Language::En).to_string())
                .unwrap_or_else(|| required.to_string());
            issues.push(ValidationIssue::warning_for(
                format!(
                    "'{}' expects a companion block '{}' which is not in the workspace",
                    def.title.get(Language::En),
                    required_title
                ),
                instance.instance_id.clone(),
            ));
        }
    }
}

/// Rule 3: more than one constructor block. The assembler's policy is that
/// the first constructor in insertion order wins; the rest are skipped, and
/// this rule tells the user so.
pub fn check_duplicate_constructor(
    graph: &ContractGraph,
    catalog: &BlockCatalog,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut constructors = graph.instances().filter(|instance| {
        catalog
            .lookup(&instance.definition_id)
            .map(|def| def.block_type == BlockType::Constructor)
            .unwrap_or(false)
    });

    let Some(first) = constructors.next() else {
        return;
    };
    let extras: Vec<_> = constructors.collect();
    if extras.is_empty() {
        return;
    }
    for extra in extras {
        issues.push(ValidationIssue::warning_for(
            format!(
                "multiple constructor blocks: '{}' is used, this one is skipped",
                first.instance_id
            ),
            extra.instance_id.clone(),
        ));
    }
}

/// Rule 4: definition ids the catalog cannot resolve. Stale snapshots and
/// catalog drift produce these; they degrade to stubs at assembly time.
pub fn check_unresolved(
    graph: &ContractGraph,
    catalog: &BlockCatalog,
    issues: &mut Vec<ValidationIssue>,
) {
    for instance in graph.instances() {
        if catalog.lookup(&instance.definition_id).is_none() {
            issues.push(ValidationIssue::warning_for(
                format!(
                    "block definition '{}' is not in the catalog; a stub will be generated",
                    instance.definition_id
                ),
                instance.instance_id.clone(),
            ));
        }
    }
}
