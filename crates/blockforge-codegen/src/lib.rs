//! Template-driven Solidity assembly for contract graphs.
//!
//! This crate turns an assembled [`ContractGraph`](blockforge_core::ContractGraph)
//! into contract source text, locally and deterministically.
//!
//! # Modules
//!
//! - [`templates`] -- the definition-id -> generation-function lookup table
//!   plus the generic stub fallback
//! - [`assembler`] -- bucket partitioning, section comments, preamble and
//!   wrapper emission

pub mod assembler;
pub mod templates;

pub use assembler::{assemble, has_contract_wrapper, sanitize_contract_name, section_heading};
pub use templates::{stub_fragment, template_for, TemplateFn};
