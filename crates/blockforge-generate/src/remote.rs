//! Remote text-generation backend: request shape and the HTTP client.
//!
//! The backend is an opaque external collaborator. The request is a
//! structured description of every block instance (type, localized title and
//! description, parameters) plus a language tag; the response is free-text
//! candidate source code. Everything it returns is untrusted: the
//! orchestrator decides whether to keep it.
//!
//! [`HttpBackend`] speaks the OpenAI-compatible chat-completions wire format.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::json;

use blockforge_core::{BlockCatalog, ContractGraph, Language, Parameter};

use crate::error::RemoteError;

/// One block instance, described for the remote backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBlock {
    pub block_type: String,
    pub title: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

/// The full request payload sent to the remote backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    pub contract_name: String,
    pub language: String,
    pub blocks: Vec<RemoteBlock>,
}

/// Builds the remote request from the graph, in insertion order.
///
/// Instances with unresolved definitions are described by their raw id so
/// the backend sees the same graph the local assembler would.
pub fn build_request(
    graph: &ContractGraph,
    catalog: &BlockCatalog,
    language: Language,
) -> RemoteRequest {
    let blocks = graph
        .instances()
        .map(|instance| match catalog.lookup(&instance.definition_id) {
            Some(def) => RemoteBlock {
                block_type: def.block_type.as_tag().to_string(),
                title: def.title.get(language).to_string(),
                description: def.description.get(language).to_string(),
                parameters: def.parameters.clone(),
            },
            None => RemoteBlock {
                block_type: "unknown".to_string(),
                title: instance.definition_id.to_string(),
                description: String::new(),
                parameters: Vec::new(),
            },
        })
        .collect();

    RemoteRequest {
        contract_name: graph.name().to_string(),
        language: language.as_tag().to_string(),
        blocks,
    }
}

/// A remote text-generation backend.
///
/// Implementations must not panic; every failure mode maps to a
/// [`RemoteError`] the orchestrator can recover from.
pub trait RemoteBackend: Send + Sync {
    fn generate(
        &self,
        request: RemoteRequest,
    ) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// Configuration of the OpenAI-compatible HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the provider, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    /// Bearer token. Empty string when the provider needs none.
    pub api_key: String,
    /// Model identifier passed through verbatim.
    pub model: String,
}

/// OpenAI-compatible chat client producing contract source text.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: HttpBackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Self {
        HttpBackend {
            config,
            client: reqwest::Client::new(),
        }
    }
}

impl RemoteBackend for HttpBackend {
    fn generate(
        &self,
        request: RemoteRequest,
    ) -> impl Future<Output = Result<String, RemoteError>> + Send {
        let client = self.client.clone();
        let config = self.config.clone();

        async move {
            let endpoint = format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            );

            let payload = serde_json::to_string_pretty(&request)
                .map_err(|err| RemoteError::Malformed(err.to_string()))?;
            let body = json!({
                "model": config.model,
                "messages": [
                    {
                        "role": "system",
                        "content": "You generate Solidity contract source from a structured \
                                    block list. Respond with contract source code only."
                    },
                    {
                        "role": "user",
                        "content": payload
                    }
                ]
            });

            let response = client
                .post(endpoint)
                .header("Authorization", format!("Bearer {}", config.api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|err| RemoteError::Network(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Http {
                    status: status.as_u16(),
                });
            }

            let body_text = response
                .text()
                .await
                .map_err(|err| RemoteError::Network(err.to_string()))?;

            let parsed: ChatResponse = serde_json::from_str(&body_text)
                .map_err(|err| RemoteError::Malformed(err.to_string()))?;

            let content = parsed
                .choices
                .first()
                .and_then(|choice| choice.message.content.clone())
                .map(|text| strip_code_fences(&text))
                .filter(|text| !text.is_empty())
                .ok_or(RemoteError::Empty)?;

            Ok(content)
        }
    }
}

/// Removes a wrapping markdown code fence, if the backend added one.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string on the opening fence ("solidity", "sol", ...).
    let rest = match rest.split_once('\n') {
        Some((_info, body)) => body,
        None => rest,
    };
    rest.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockforge_core::{DefinitionId, Position};

    #[test]
    fn build_request_preserves_insertion_order_and_localizes() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        graph
            .add_block(&catalog, DefinitionId::new("transfer"), Position::default())
            .unwrap();
        graph
            .add_block(&catalog, DefinitionId::new("balances"), Position::default())
            .unwrap();

        let request = build_request(&graph, &catalog, Language::Ru);
        assert_eq!(request.language, "ru");
        assert_eq!(request.blocks.len(), 2);
        assert_eq!(request.blocks[0].block_type, "function");
        assert_eq!(request.blocks[0].title, "Перевод");
        assert_eq!(request.blocks[1].block_type, "variable");
    }

    #[test]
    fn build_request_describes_unresolved_ids_by_raw_id() {
        let catalog = BlockCatalog::builtin();
        let mut graph = ContractGraph::new("Token");
        graph
            .insert_instance(blockforge_core::BlockInstance {
                instance_id: blockforge_core::InstanceId::new("stale-1"),
                definition_id: DefinitionId::new("xyz"),
                position: Position::default(),
            })
            .unwrap();

        let request = build_request(&graph, &catalog, Language::En);
        assert_eq!(request.blocks[0].block_type, "unknown");
        assert_eq!(request.blocks[0].title, "xyz");
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = RemoteRequest {
            contract_name: "Token".to_string(),
            language: "en".to_string(),
            blocks: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("contractName").is_some());
    }

    #[test]
    fn strip_code_fences_handles_fenced_and_plain_text() {
        assert_eq!(
            strip_code_fences("```solidity\ncontract A { }\n```"),
            "contract A { }"
        );
        assert_eq!(strip_code_fences("contract A { }"), "contract A { }");
        assert_eq!(strip_code_fences("  contract A { }  "), "contract A { }");
        // Unterminated fence is left alone rather than mangled.
        assert_eq!(strip_code_fences("```contract"), "```contract");
    }
}
