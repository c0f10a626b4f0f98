//! The deterministic contract assembler.
//!
//! [`assemble`] is a pure function from `(graph, catalog, language)` to
//! Solidity source text. Identical inputs produce byte-identical output.
//!
//! Structure is guaranteed by construction, never checked after the fact:
//! every fragment is self-closing (templates.rs), sections are emitted in
//! the fixed order variable -> event -> modifier -> constructor -> function,
//! and the fixed preamble/wrapper contributes the only unmatched brace pair.

use blockforge_core::{BlockCatalog, BlockType, ContractGraph, Language};

use crate::templates::{stub_fragment, template_for};

/// Version pin emitted into every generated contract.
pub const PRAGMA_LINE: &str = "pragma solidity ^0.8.19;";

/// License header emitted into every generated contract.
pub const LICENSE_LINE: &str = "// SPDX-License-Identifier: MIT";

/// Assembles `graph` into contract source text.
///
/// Instances whose definition id does not resolve degrade to comment-only
/// stubs in the function section; they never fail assembly. When multiple
/// constructor blocks are present, the first in insertion order wins and the
/// rest are skipped (the validator warns about them). When none is present,
/// a minimal owner-establishing constructor stub is emitted.
pub fn assemble(graph: &ContractGraph, catalog: &BlockCatalog, language: Language) -> String {
    let mut buckets: [Vec<String>; 5] = Default::default();

    // The owner declaration always opens the state-variables section: both
    // the default constructor stub and the onlyOwner modifier reference it.
    buckets[bucket_index(BlockType::Variable)].push("    address public owner;".to_string());

    for instance in graph.instances() {
        match catalog.lookup(&instance.definition_id) {
            Some(def) => {
                let fragment = match template_for(def.id.as_str()) {
                    Some(template) => template(def),
                    None => stub_fragment(def, language),
                };
                buckets[bucket_index(def.block_type)].push(fragment);
            }
            None => {
                // Unresolved id: keep the output closed with a comment-only
                // stub carrying the raw id, placed in the function section.
                buckets[bucket_index(BlockType::Function)].push(format!(
                    "    // unknown block: {} ({})",
                    instance.definition_id, instance.instance_id
                ));
            }
        }
    }

    // Constructor policy: first one wins; default stub when absent.
    let constructors = &mut buckets[bucket_index(BlockType::Constructor)];
    if constructors.is_empty() {
        constructors.push(
            "    constructor() {\n        owner = msg.sender;\n    }".to_string(),
        );
    } else {
        constructors.truncate(1);
    }

    let mut sections = Vec::new();
    for block_type in BlockType::ASSEMBLY_ORDER {
        let fragments = &buckets[bucket_index(block_type)];
        if fragments.is_empty() {
            continue;
        }
        // Single-line declarations sit on adjacent lines; block declarations
        // get a blank line between them.
        let separator = match block_type {
            BlockType::Variable | BlockType::Event => "\n",
            _ => "\n\n",
        };
        sections.push(format!(
            "{}\n{}",
            section_heading(block_type, language),
            fragments.join(separator)
        ));
    }

    format!(
        "{}\n{}\n\ncontract {} {{\n{}\n}}\n",
        LICENSE_LINE,
        PRAGMA_LINE,
        sanitize_contract_name(graph.name()),
        sections.join("\n\n")
    )
}

/// Localized section comment for one bucket.
pub fn section_heading(block_type: BlockType, language: Language) -> String {
    let label = match (block_type, language) {
        (BlockType::Variable, Language::En) => "State variables",
        (BlockType::Variable, Language::Ru) => "Переменные состояния",
        (BlockType::Event, Language::En) => "Events",
        (BlockType::Event, Language::Ru) => "События",
        (BlockType::Modifier, Language::En) => "Modifiers",
        (BlockType::Modifier, Language::Ru) => "Модификаторы",
        (BlockType::Constructor, Language::En) => "Constructor",
        (BlockType::Constructor, Language::Ru) => "Конструктор",
        (BlockType::Function, Language::En) => "Functions",
        (BlockType::Function, Language::Ru) => "Функции",
    };
    format!("    // --- {} ---", label)
}

/// Reduces a user-supplied contract name to a Solidity identifier.
/// Falls back to `GeneratedContract` when nothing usable is left.
pub fn sanitize_contract_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        return "GeneratedContract".to_string();
    }
    if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("_{}", cleaned)
    } else {
        cleaned
    }
}

/// True when `code` contains a `contract` declaration with balanced braces
/// (at least one pair, never dipping negative). This is the orchestrator's
/// structural acceptance check for untrusted remote output; local output
/// satisfies it by construction.
pub fn has_contract_wrapper(code: &str) -> bool {
    if !code.contains("contract ") {
        return false;
    }
    let mut depth: i64 = 0;
    let mut pairs = 0;
    for c in code.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
                pairs += 1;
            }
            _ => {}
        }
    }
    depth == 0 && pairs > 0
}

fn bucket_index(block_type: BlockType) -> usize {
    match block_type {
        BlockType::Variable => 0,
        BlockType::Event => 1,
        BlockType::Modifier => 2,
        BlockType::Constructor => 3,
        BlockType::Function => 4,
    }
}
