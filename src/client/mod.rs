//! Letta REST API client
//!
//! A thin async HTTP client over the Letta server. Calls are grouped the way the
//! server groups them: agents, messages, tools and passages (archival memory).
//!
//! ```ignore
//! let client = LettaClient::from_env()?;
//! let agent = client.agents().retrieve("agent-123").await?;
//! let response = client
//!     .messages()
//!     .create(&agent.id, vec![MessageInput::user("Hello")], vec![])
//!     .await?;
//! println!("{}", response.assistant_text());
//! ```

mod types;

pub use types::{
    AgentMemory, AgentState, AttachedTool, ClientTool, CreateAgent, CreatePassage, LettaMessage,
    LettaResponse, LlmConfig, MemoryBlock, MessageCreate, MessageInput, MessageText, Passage,
    PassageSearchResponse, PassageSearchResult, TextPart, ToolCallPayload, ToolCreate, ToolRecord,
    ToolReturn, UpdateAgent,
};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::config::{ConfigError, LettaConfig};

/// Errors that can occur during API client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing or rejected API token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Letta API client
#[derive(Debug, Clone)]
pub struct LettaClient {
    http: Client,
    config: LettaConfig,
}

impl LettaClient {
    /// Create a client for the given configuration
    pub fn new(config: LettaConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        tracing::info!("Created Letta client for {}", config.base_url);
        Ok(Self { http, config })
    }

    /// Create a client from `LETTA_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::new(LettaConfig::from_env()?)
    }

    pub fn config(&self) -> &LettaConfig {
        &self.config
    }

    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi { client: self }
    }

    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi { client: self }
    }

    pub fn tools(&self) -> ToolsApi<'_> {
        ToolsApi { client: self }
    }

    pub fn passages(&self) -> PassagesApi<'_> {
        PassagesApi { client: self }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!("[Letta] {} {}", method, url);

        let builder = self.http.request(method, url);
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON response body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let text = self.send_raw(builder).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request, map error statuses, and return the body text
    async fn send_raw(&self, builder: RequestBuilder) -> ClientResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("[Letta] Response status: {}", status);

        if status.is_success() {
            return Ok(body);
        }

        tracing::error!("[Letta] API error: {} - {}", status, body);
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(body),
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            _ => ClientError::Api {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_raw(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

fn tag_query(tags: &[String]) -> Vec<(&'static str, String)> {
    tags.iter().map(|t| ("tags", t.clone())).collect()
}

/// Agent lifecycle and core memory
pub struct AgentsApi<'a> {
    client: &'a LettaClient,
}

impl AgentsApi<'_> {
    pub async fn create(&self, request: &CreateAgent) -> ClientResult<AgentState> {
        tracing::info!("Creating agent: {}", request.name);
        self.client
            .send_json(Method::POST, "/v1/agents/", request)
            .await
    }

    pub async fn retrieve(&self, agent_id: &str) -> ClientResult<AgentState> {
        self.client
            .get(&format!("/v1/agents/{}", agent_id), &[])
            .await
    }

    /// List agents, optionally filtered by tags
    pub async fn list(&self, tags: &[String]) -> ClientResult<Vec<AgentState>> {
        self.client.get("/v1/agents/", &tag_query(tags)).await
    }

    pub async fn update(&self, agent_id: &str, request: &UpdateAgent) -> ClientResult<AgentState> {
        tracing::info!("Updating agent: {}", agent_id);
        self.client
            .send_json(Method::PATCH, &format!("/v1/agents/{}", agent_id), request)
            .await
    }

    pub async fn delete(&self, agent_id: &str) -> ClientResult<()> {
        tracing::info!("Deleting agent: {}", agent_id);
        self.client.delete(&format!("/v1/agents/{}", agent_id)).await
    }

    /// Replace the value of one core memory block
    pub async fn modify_block(
        &self,
        agent_id: &str,
        label: &str,
        value: &str,
    ) -> ClientResult<MemoryBlock> {
        tracing::info!("Updating memory block '{}' of agent {}", label, agent_id);
        self.client
            .send_json(
                Method::PATCH,
                &format!("/v1/agents/{}/core-memory/blocks/{}", agent_id, label),
                &json!({ "value": value }),
            )
            .await
    }
}

/// Conversation turns
pub struct MessagesApi<'a> {
    client: &'a LettaClient,
}

impl MessagesApi<'_> {
    /// Send messages to an agent and wait for the full turn
    pub async fn create(
        &self,
        agent_id: &str,
        messages: Vec<MessageInput>,
        client_tools: Vec<ClientTool>,
    ) -> ClientResult<LettaResponse> {
        tracing::info!(
            "Sending {} message(s) to agent {} ({} client tools)",
            messages.len(),
            agent_id,
            client_tools.len()
        );
        let body = MessageCreate {
            messages,
            client_tools,
        };
        self.client
            .send_json(Method::POST, &format!("/v1/agents/{}/messages", agent_id), &body)
            .await
    }
}

/// Server-side tool registry
pub struct ToolsApi<'a> {
    client: &'a LettaClient,
}

impl ToolsApi<'_> {
    pub async fn create(&self, request: &ToolCreate) -> ClientResult<ToolRecord> {
        self.client.send_json(Method::POST, "/v1/tools/", request).await
    }

    /// Create the tool, or update it if one with the same name exists
    pub async fn upsert(&self, request: &ToolCreate) -> ClientResult<ToolRecord> {
        self.client.send_json(Method::PUT, "/v1/tools/", request).await
    }

    pub async fn list(&self, tags: &[String]) -> ClientResult<Vec<ToolRecord>> {
        self.client.get("/v1/tools/", &tag_query(tags)).await
    }

    pub async fn delete(&self, tool_id: &str) -> ClientResult<()> {
        tracing::info!("Deleting tool: {}", tool_id);
        self.client.delete(&format!("/v1/tools/{}", tool_id)).await
    }
}

/// Archival memory
pub struct PassagesApi<'a> {
    client: &'a LettaClient,
}

impl PassagesApi<'_> {
    pub async fn create(&self, agent_id: &str, request: &CreatePassage) -> ClientResult<Vec<Passage>> {
        self.client
            .send_json(
                Method::POST,
                &format!("/v1/agents/{}/archival-memory", agent_id),
                request,
            )
            .await
    }

    pub async fn list(&self, agent_id: &str) -> ClientResult<Vec<Passage>> {
        self.client
            .get(&format!("/v1/agents/{}/archival-memory", agent_id), &[])
            .await
    }

    /// Semantic search over an agent's passages
    pub async fn search(
        &self,
        agent_id: &str,
        query: &str,
        top_k: usize,
    ) -> ClientResult<PassageSearchResponse> {
        self.client
            .get(
                &format!("/v1/agents/{}/archival-memory/search", agent_id),
                &[("query", query.to_string()), ("top_k", top_k.to_string())],
            )
            .await
    }
}
