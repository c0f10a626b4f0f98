//! The generation orchestrator: the subsystem's single reliability boundary.
//!
//! [`Orchestrator::generate`] always returns a usable [`GenerationResult`],
//! regardless of remote backend health. The remote call's outcome is modeled
//! as a value with an explicit recovery step — use the text, or run the
//! local assembler — never as propagated exceptions.
//!
//! Staleness: every call records the graph's revision into a monotonic
//! high-water mark. A remote response whose revision is below the mark by
//! completion time is discarded, so a slow in-flight response can never
//! override the result of a newer edit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use blockforge_check::Severity;
use blockforge_codegen::{assemble, has_contract_wrapper};
use blockforge_core::{BlockCatalog, ContractGraph, Language};

use crate::remote::{build_request, HttpBackend, RemoteBackend};

/// Which generation path the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Deterministic local assembly only.
    Local,
    /// Try the remote backend, falling back to local assembly silently.
    Remote,
}

/// The single output value of a generation call.
///
/// Recomputed on every call; never shared mutable state. `errors` is
/// reserved for conditions that should block confident use of the output —
/// currently none are fatal by design, so everything lands in `warnings`
/// and `suggestions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub code: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Arbitrates between the local assembler and an optional remote backend.
pub struct Orchestrator<B = HttpBackend> {
    backend: Option<B>,
    timeout: Duration,
    /// Highest graph revision any generate call has seen.
    high_water: AtomicU64,
}

/// Remote calls slower than this are treated like any other remote failure.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

impl Orchestrator<HttpBackend> {
    /// An orchestrator with no remote backend configured. Remote-preference
    /// calls fall back to the local assembler with a suggestion.
    pub fn local() -> Self {
        Orchestrator {
            backend: None,
            timeout: DEFAULT_REMOTE_TIMEOUT,
            high_water: AtomicU64::new(0),
        }
    }
}

impl<B: RemoteBackend> Orchestrator<B> {
    pub fn with_backend(backend: B) -> Self {
        Orchestrator {
            backend: Some(backend),
            timeout: DEFAULT_REMOTE_TIMEOUT,
            high_water: AtomicU64::new(0),
        }
    }

    pub fn with_backend_and_timeout(backend: B, timeout: Duration) -> Self {
        Orchestrator {
            backend: Some(backend),
            timeout,
            high_water: AtomicU64::new(0),
        }
    }

    /// Generates contract source for `graph`.
    ///
    /// Never fails and never panics: validation issues become warnings,
    /// every remote failure mode (network error, non-2xx, empty or malformed
    /// body, timeout, stale response, missing configuration) falls back to
    /// the local assembler and is recorded as a suggestion.
    pub async fn generate(
        &self,
        graph: &ContractGraph,
        catalog: &BlockCatalog,
        language: Language,
        preference: BackendPreference,
    ) -> GenerationResult {
        let revision = graph.revision();
        self.high_water.fetch_max(revision, Ordering::SeqCst);

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for issue in blockforge_check::validate(graph, catalog) {
            match issue.severity {
                Severity::Error => errors.push(issue.message),
                Severity::Warning => warnings.push(issue.message),
            }
        }

        let mut suggestions = Vec::new();

        let code = match preference {
            BackendPreference::Local => assemble(graph, catalog, language),
            BackendPreference::Remote => {
                match self.run_remote(graph, catalog, language, revision).await {
                    Ok(text) => text,
                    Err(reason) => {
                        tracing::warn!(%reason, "falling back to the local assembler");
                        suggestions.push(format!(
                            "{}; the local assembler produced this code",
                            reason
                        ));
                        assemble(graph, catalog, language)
                    }
                }
            }
        };

        let is_valid =
            !graph.is_empty() && !code.trim().is_empty() && has_contract_wrapper(&code);

        GenerationResult {
            code,
            is_valid,
            errors,
            warnings,
            suggestions,
        }
    }

    /// Attempts remote generation. The `Err` carries the human-readable
    /// fallback reason; it is a value, not a fault.
    async fn run_remote(
        &self,
        graph: &ContractGraph,
        catalog: &BlockCatalog,
        language: Language,
        revision: u64,
    ) -> Result<String, String> {
        let Some(backend) = &self.backend else {
            return Err("remote generation is not configured".to_string());
        };

        let request = build_request(graph, catalog, language);
        let text = match tokio::time::timeout(self.timeout, backend.generate(request)).await {
            Err(_) => return Err("remote generation timed out".to_string()),
            Ok(Err(err)) => return Err(format!("remote generation failed: {}", err)),
            Ok(Ok(text)) => text.trim().to_string(),
        };

        if text.is_empty() {
            return Err("remote backend returned empty text".to_string());
        }
        if self.high_water.load(Ordering::SeqCst) > revision {
            return Err("a newer edit superseded the remote response".to_string());
        }
        Ok(text)
    }
}
