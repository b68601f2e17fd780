//! HTTP client for the role-scoped RAG backend.
//!
//! One network round trip per query: the prompt and the mapped
//! permission-group identifier go out as JSON, the answer and its
//! citations come back. No caching, no retry — failures surface
//! immediately to the caller.

pub mod config;
pub mod error;
pub mod response;

pub use config::BackendConfig;
pub use error::{BackendError, BackendResult};
pub use response::{QueryAnswer, QueryRequest};

use async_trait::async_trait;
use url::Url;

use crate::roles::Role;

/// Path of the query endpoint, relative to the base URL.
const QUERY_PATH: &str = "/rag/query";

/// Path of the health endpoint, relative to the base URL.
const HEALTH_PATH: &str = "/health";

/// Seam between the session controller and the network.
///
/// Implemented by [`BackendClient`]; test code substitutes scripted
/// implementations so the controller can be exercised without a network.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Perform one query exchange under `role`.
    ///
    /// `on_chunk` may fire any number of times with partial answer text;
    /// callers must append each chunk to the pending content rather than
    /// assign it.
    async fn query(
        &self,
        prompt: &str,
        role: Role,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> BackendResult<QueryAnswer>;
}

/// Client for the remote RAG service.
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::Client,
    query_url: String,
    health_url: String,
}

impl BackendClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let base = config.base_url.trim_end_matches('/').to_owned();
        Url::parse(&base)?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BackendError::HttpClient(e.to_string()))?;

        Ok(Self {
            config,
            client,
            query_url: format!("{base}{QUERY_PATH}"),
            health_url: format!("{base}{HEALTH_PATH}"),
        })
    }

    /// Create a client from the environment configuration.
    ///
    /// # Errors
    /// Returns an error if the configured base URL does not parse or the
    /// HTTP client cannot be built.
    pub fn from_env() -> BackendResult<Self> {
        Self::new(BackendConfig::from_env())
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Perform one query exchange under `role` and normalize the result.
    ///
    /// Issues a single `POST {base_url}/rag/query` carrying the role's
    /// permission-group identifier and the prompt. A non-success status
    /// or a transport failure is returned as-is — no retry, no backoff.
    ///
    /// Despite the callback-based shape, this client delivers the answer
    /// in one piece: `on_chunk` fires exactly once, with the full text,
    /// just before the call returns. Token-level streaming is an
    /// extension point of the transport, not implemented here; callers
    /// must still append (not assign) to stay compatible with it.
    ///
    /// # Errors
    /// Returns [`BackendError::Status`] for a non-2xx response and
    /// [`BackendError::Transport`] for network-level failures.
    pub async fn query(
        &self,
        prompt: &str,
        role: Role,
        mut on_chunk: impl FnMut(&str) + Send,
    ) -> BackendResult<QueryAnswer> {
        let request = QueryRequest {
            role: role.permission_group(),
            query: prompt,
        };

        tracing::debug!(role = request.role, "dispatching query");

        let response = self
            .client
            .post(&self.query_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown status").to_owned(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let answer = QueryAnswer::from_value(&body);

        // Single-shot delivery of the full answer.
        on_chunk(&answer.answer);

        Ok(answer)
    }

    /// Check whether the backend answers its health endpoint.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent at all.
    pub async fn is_ready(&self) -> BackendResult<bool> {
        let response = self.client.get(&self.health_url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl QueryBackend for BackendClient {
    async fn query(
        &self,
        prompt: &str,
        role: Role,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> BackendResult<QueryAnswer> {
        Self::query(self, prompt, role, on_chunk).await
    }
}
