//! The static block catalog.
//!
//! [`BlockCatalog`] is the process-wide registry of [`BlockDefinition`]s.
//! It is built once from the built-in definition table and read-only
//! afterwards; there is no runtime mutation API. [`BlockCatalog::global`]
//! exposes the init-once process-wide instance, while
//! [`BlockCatalog::builtin`] returns an owned copy for tests that want an
//! isolated catalog.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::block::{BlockDefinition, BlockType, Category, Mutability, Parameter, Visibility};
use crate::id::DefinitionId;
use crate::lang::LocalizedText;

/// Read-only registry of block definitions, keyed by [`DefinitionId`].
///
/// Iteration order is the built-in table order, which keeps palette
/// rendering stable across runs.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    defs: IndexMap<DefinitionId, BlockDefinition>,
}

static GLOBAL_CATALOG: OnceLock<BlockCatalog> = OnceLock::new();

impl BlockCatalog {
    /// Returns the process-wide catalog, building it on first access.
    pub fn global() -> &'static BlockCatalog {
        GLOBAL_CATALOG.get_or_init(BlockCatalog::builtin)
    }

    /// Builds a catalog from the built-in definition table.
    pub fn builtin() -> Self {
        let mut defs = IndexMap::new();
        for def in builtin_definitions() {
            defs.insert(def.id.clone(), def);
        }
        BlockCatalog { defs }
    }

    /// Looks up a definition by id. `None` means the id is unresolved;
    /// callers downstream of `add_block` must tolerate this (stale snapshots,
    /// catalog drift) rather than treat it as fatal.
    pub fn lookup(&self, id: &DefinitionId) -> Option<&BlockDefinition> {
        self.defs.get(id)
    }

    /// True if `id` resolves in this catalog.
    pub fn contains(&self, id: &DefinitionId) -> bool {
        self.defs.contains_key(id)
    }

    /// All definitions, in table order.
    pub fn definitions(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.defs.values()
    }

    /// Grouping-by-category view for palette consumers. Categories and the
    /// definitions within them appear in table order.
    pub fn by_category(&self) -> IndexMap<Category, Vec<&BlockDefinition>> {
        let mut groups: IndexMap<Category, Vec<&BlockDefinition>> = IndexMap::new();
        for def in self.defs.values() {
            groups.entry(def.category).or_default().push(def);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Shorthand constructor for table entries.
#[allow(clippy::too_many_arguments)]
fn def(
    id: &str,
    block_type: BlockType,
    category: Category,
    title: (&str, &str),
    description: (&str, &str),
    parameters: Vec<Parameter>,
    visibility: Option<Visibility>,
    mutability: Option<Mutability>,
    color: &str,
    requires: &[&str],
) -> BlockDefinition {
    BlockDefinition {
        id: DefinitionId::new(id),
        block_type,
        category,
        title: LocalizedText::new(title.0, title.1),
        description: LocalizedText::new(description.0, description.1),
        parameters,
        visibility,
        mutability,
        color: color.to_string(),
        requires: requires.iter().map(|r| DefinitionId::new(*r)).collect(),
    }
}

/// The built-in definition table. Loaded once; the only source of catalog
/// entries.
fn builtin_definitions() -> Vec<BlockDefinition> {
    vec![
        // --- State variables -------------------------------------------------
        def(
            "total-supply",
            BlockType::Variable,
            Category::Storage,
            ("Total supply", "Общее предложение"),
            (
                "Public counter of all tokens in circulation",
                "Публичный счётчик всех токенов в обращении",
            ),
            vec![],
            Some(Visibility::Public),
            None,
            "#4f9cf9",
            &[],
        ),
        def(
            "balances",
            BlockType::Variable,
            Category::Storage,
            ("Balances mapping", "Соответствие балансов"),
            (
                "Per-address token balance storage",
                "Хранение баланса токенов по адресам",
            ),
            vec![],
            None,
            None,
            "#4f9cf9",
            &[],
        ),
        def(
            "allowances",
            BlockType::Variable,
            Category::Storage,
            ("Allowances mapping", "Соответствие разрешений"),
            (
                "Spending allowances between address pairs",
                "Лимиты расходования между парами адресов",
            ),
            vec![],
            None,
            None,
            "#4f9cf9",
            &[],
        ),
        def(
            "paused",
            BlockType::Variable,
            Category::Storage,
            ("Paused flag", "Флаг паузы"),
            (
                "Circuit-breaker flag halting state changes",
                "Флаг-предохранитель, останавливающий изменения состояния",
            ),
            vec![],
            Some(Visibility::Public),
            None,
            "#4f9cf9",
            &[],
        ),
        // --- Events ----------------------------------------------------------
        def(
            "transfer-event",
            BlockType::Event,
            Category::Events,
            ("Transfer event", "Событие перевода"),
            (
                "Emitted when tokens move between addresses",
                "Выдаётся при перемещении токенов между адресами",
            ),
            vec![
                Parameter::required("from", "address"),
                Parameter::required("to", "address"),
                Parameter::required("value", "uint256"),
            ],
            None,
            None,
            "#f6a74c",
            &[],
        ),
        def(
            "approval-event",
            BlockType::Event,
            Category::Events,
            ("Approval event", "Событие одобрения"),
            (
                "Emitted when a spending allowance is set",
                "Выдаётся при установке лимита расходования",
            ),
            vec![
                Parameter::required("owner", "address"),
                Parameter::required("spender", "address"),
                Parameter::required("value", "uint256"),
            ],
            None,
            None,
            "#f6a74c",
            &[],
        ),
        // --- Modifiers -------------------------------------------------------
        def(
            "only-owner",
            BlockType::Modifier,
            Category::Access,
            ("Only owner", "Только владелец"),
            (
                "Restricts a function to the contract owner",
                "Ограничивает функцию владельцем контракта",
            ),
            vec![],
            None,
            None,
            "#a06ef0",
            &[],
        ),
        def(
            "when-not-paused",
            BlockType::Modifier,
            Category::Access,
            ("When not paused", "Когда не на паузе"),
            (
                "Blocks a function while the contract is paused",
                "Блокирует функцию, пока контракт на паузе",
            ),
            vec![],
            None,
            None,
            "#a06ef0",
            &["paused"],
        ),
        // --- Constructor -----------------------------------------------------
        def(
            "init-constructor",
            BlockType::Constructor,
            Category::Lifecycle,
            ("Constructor", "Конструктор"),
            (
                "Runs once at deployment, records the deployer as owner",
                "Выполняется один раз при развёртывании, записывает владельца",
            ),
            vec![Parameter::optional("initialSupply", "uint256")],
            None,
            None,
            "#5ec48f",
            &[],
        ),
        // --- Functions -------------------------------------------------------
        def(
            "transfer",
            BlockType::Function,
            Category::Token,
            ("Transfer", "Перевод"),
            (
                "Moves tokens from the caller to another address",
                "Переводит токены от вызывающего на другой адрес",
            ),
            vec![
                Parameter::required("to", "address"),
                Parameter::required("amount", "uint256"),
            ],
            Some(Visibility::Public),
            None,
            "#e06666",
            &["balances", "transfer-event"],
        ),
        def(
            "approve",
            BlockType::Function,
            Category::Token,
            ("Approve", "Одобрение"),
            (
                "Grants another address a spending allowance",
                "Даёт другому адресу лимит расходования",
            ),
            vec![
                Parameter::required("spender", "address"),
                Parameter::required("amount", "uint256"),
            ],
            Some(Visibility::Public),
            None,
            "#e06666",
            &["allowances", "approval-event"],
        ),
        def(
            "balance-of",
            BlockType::Function,
            Category::Token,
            ("Balance of", "Баланс адреса"),
            (
                "Reads the token balance of an address",
                "Читает баланс токенов адреса",
            ),
            vec![Parameter::required("account", "address")],
            Some(Visibility::Public),
            Some(Mutability::View),
            "#e06666",
            &["balances"],
        ),
        def(
            "mint",
            BlockType::Function,
            Category::Token,
            ("Mint", "Выпуск"),
            (
                "Creates new tokens and assigns them to an address",
                "Создаёт новые токены и зачисляет их на адрес",
            ),
            vec![
                Parameter::required("to", "address"),
                Parameter::required("amount", "uint256"),
            ],
            Some(Visibility::Public),
            None,
            "#e06666",
            &["total-supply", "balances"],
        ),
        def(
            "burn",
            BlockType::Function,
            Category::Token,
            ("Burn", "Сжигание"),
            (
                "Destroys tokens held by the caller",
                "Уничтожает токены вызывающего",
            ),
            vec![Parameter::required("amount", "uint256")],
            Some(Visibility::Public),
            None,
            "#e06666",
            &["total-supply", "balances"],
        ),
        def(
            "set-paused",
            BlockType::Function,
            Category::Access,
            ("Set paused", "Установить паузу"),
            (
                "Flips the circuit-breaker flag",
                "Переключает флаг-предохранитель",
            ),
            vec![Parameter::required("state", "bool")],
            Some(Visibility::Public),
            None,
            "#e06666",
            &["paused", "only-owner"],
        ),
    ]
}
