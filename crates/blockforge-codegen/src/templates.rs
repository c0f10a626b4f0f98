//! Per-definition-id generation templates.
//!
//! Dispatch is a lookup table mapping definition id to a pure generation
//! function, with [`stub_fragment`] as the fallback for definitions without
//! a registered template. Adding a block means adding one table entry, not
//! touching a central conditional.
//!
//! Every template returns a self-closing declaration fragment: braces open
//! and close inside the fragment, so the assembler's structural guarantee
//! holds by construction.

use std::collections::HashMap;
use std::sync::OnceLock;

use blockforge_core::{BlockDefinition, BlockType, Language};

/// A pure generation function for one definition id.
///
/// Fragments are indented for the contract body and carry no trailing
/// newline; the assembler owns all separation between fragments.
pub type TemplateFn = fn(&BlockDefinition) -> String;

static TEMPLATES: OnceLock<HashMap<&'static str, TemplateFn>> = OnceLock::new();

/// Looks up the registered template for `definition_id`.
pub fn template_for(definition_id: &str) -> Option<TemplateFn> {
    templates().get(definition_id).copied()
}

fn templates() -> &'static HashMap<&'static str, TemplateFn> {
    TEMPLATES.get_or_init(|| {
        let mut table: HashMap<&'static str, TemplateFn> = HashMap::new();
        table.insert("total-supply", total_supply);
        table.insert("balances", balances);
        table.insert("allowances", allowances);
        table.insert("paused", paused);
        table.insert("transfer-event", transfer_event);
        table.insert("approval-event", approval_event);
        table.insert("only-owner", only_owner);
        table.insert("when-not-paused", when_not_paused);
        table.insert("init-constructor", init_constructor);
        table.insert("transfer", transfer);
        table.insert("approve", approve);
        table.insert("balance-of", balance_of);
        table.insert("mint", mint);
        table.insert("burn", burn);
        table.insert("set-paused", set_paused);
        table
    })
}

/// Renders a definition's parameter list verbatim: `type name, type name`.
pub fn render_params(def: &BlockDefinition) -> String {
    def.parameters
        .iter()
        .map(|p| format!("{} {}", p.param_type, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Visibility + mutability keywords for a function signature, each prefixed
/// with a space (empty when absent).
fn signature_tags(def: &BlockDefinition) -> String {
    let mut tags = String::new();
    if let Some(visibility) = def.visibility {
        tags.push(' ');
        tags.push_str(visibility.keyword());
    }
    if let Some(mutability) = def.mutability {
        tags.push(' ');
        tags.push_str(mutability.keyword());
    }
    tags
}

/// Turns a definition id into a Solidity identifier (`balance-of` ->
/// `balance_of`). Used by stubs, where no hand-written name exists.
pub fn identifier_from(definition_id: &str) -> String {
    let mut ident: String = definition_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Generic fallback for a resolved definition with no registered template.
///
/// The output is a self-closing declaration of the right kind with the
/// block's localized display title preserved as a comment, so the contract
/// stays syntactically closed and the user can see what the block was.
pub fn stub_fragment(def: &BlockDefinition, language: Language) -> String {
    let title = def.title.get(language);
    let ident = identifier_from(def.id.as_str());
    match def.block_type {
        BlockType::Variable => {
            format!("    // {}\n    uint256 private {};", title, ident)
        }
        BlockType::Event => {
            format!(
                "    // {}\n    event {}({});",
                title,
                capitalize(&ident),
                render_params(def)
            )
        }
        BlockType::Modifier => format!(
            "    modifier {}() {{\n        // {}\n        _;\n    }}",
            ident, title
        ),
        BlockType::Constructor => format!(
            "    constructor({}) {{\n        // {}\n        owner = msg.sender;\n    }}",
            render_params(def),
            title
        ),
        BlockType::Function => format!(
            "    function {}({}){} {{\n        // {}\n    }}",
            ident,
            render_params(def),
            signature_tags(def),
            title
        ),
    }
}

fn capitalize(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Registered templates
// ---------------------------------------------------------------------------

fn total_supply(def: &BlockDefinition) -> String {
    let visibility = def
        .visibility
        .map(|v| v.keyword())
        .unwrap_or("public");
    format!("    uint256 {} totalSupply;", visibility)
}

fn balances(_def: &BlockDefinition) -> String {
    "    mapping(address => uint256) private balances;".to_string()
}

fn allowances(_def: &BlockDefinition) -> String {
    "    mapping(address => mapping(address => uint256)) private allowances;".to_string()
}

fn paused(def: &BlockDefinition) -> String {
    let visibility = def
        .visibility
        .map(|v| v.keyword())
        .unwrap_or("public");
    format!("    bool {} paused;", visibility)
}

fn transfer_event(def: &BlockDefinition) -> String {
    format!("    event Transfer({});", render_params(def))
}

fn approval_event(def: &BlockDefinition) -> String {
    format!("    event Approval({});", render_params(def))
}

fn only_owner(_def: &BlockDefinition) -> String {
    concat!(
        "    modifier onlyOwner() {\n",
        "        require(msg.sender == owner, \"caller is not the owner\");\n",
        "        _;\n",
        "    }"
    )
    .to_string()
}

fn when_not_paused(_def: &BlockDefinition) -> String {
    concat!(
        "    modifier whenNotPaused() {\n",
        "        require(!paused, \"contract is paused\");\n",
        "        _;\n",
        "    }"
    )
    .to_string()
}

fn init_constructor(def: &BlockDefinition) -> String {
    format!(
        "    constructor({}) {{\n        owner = msg.sender;\n    }}",
        render_params(def)
    )
}

fn transfer(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function transfer({}){} returns (bool) {{\n",
            "        require(balances[msg.sender] >= amount, \"insufficient balance\");\n",
            "        balances[msg.sender] -= amount;\n",
            "        balances[to] += amount;\n",
            "        emit Transfer(msg.sender, to, amount);\n",
            "        return true;\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}

fn approve(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function approve({}){} returns (bool) {{\n",
            "        allowances[msg.sender][spender] = amount;\n",
            "        emit Approval(msg.sender, spender, amount);\n",
            "        return true;\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}

fn balance_of(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function balanceOf({}){} returns (uint256) {{\n",
            "        return balances[account];\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}

fn mint(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function mint({}){} {{\n",
            "        totalSupply += amount;\n",
            "        balances[to] += amount;\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}

fn burn(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function burn({}){} {{\n",
            "        require(balances[msg.sender] >= amount, \"insufficient balance\");\n",
            "        balances[msg.sender] -= amount;\n",
            "        totalSupply -= amount;\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}

fn set_paused(def: &BlockDefinition) -> String {
    format!(
        concat!(
            "    function setPaused({}){} onlyOwner {{\n",
            "        paused = state;\n",
            "    }}"
        ),
        render_params(def),
        signature_tags(def)
    )
}
