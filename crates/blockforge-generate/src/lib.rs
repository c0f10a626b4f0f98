//! Generation orchestration for contract graphs.
//!
//! Chooses between the deterministic local assembler
//! ([`blockforge_codegen`]) and an optional remote text-generation backend,
//! owning fallback and staleness handling. The contract is simple: every
//! call to [`Orchestrator::generate`] returns a structured
//! [`GenerationResult`], never a fault.
//!
//! # Modules
//!
//! - [`orchestrator`] -- the reliability boundary and result type
//! - [`remote`] -- the backend trait, request shape, and HTTP client
//! - [`error`] -- remote failure taxonomy

pub mod error;
pub mod orchestrator;
pub mod remote;

pub use error::RemoteError;
pub use orchestrator::{BackendPreference, GenerationResult, Orchestrator, DEFAULT_REMOTE_TIMEOUT};
pub use remote::{build_request, HttpBackend, HttpBackendConfig, RemoteBackend, RemoteRequest};
