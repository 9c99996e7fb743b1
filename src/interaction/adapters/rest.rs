//! Reqwest-backed client for the platform REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::command::domain::{ApplicationCommandSchema, RegisteredCommand};
use crate::interaction::domain::WebhookEditBody;
use crate::interaction::ports::{InteractionRestClient, RestError, RestResult};

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/slashhook/slashhook, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// REST client authenticating with a bot token.
#[derive(Debug, Clone)]
pub struct DiscordRestClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DiscordRestClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> RestResult<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    /// Creates a client against another base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the HTTP client cannot be built.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> RestResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(RestError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn commands_url(&self, application_id: &str) -> String {
        format!("{}/applications/{application_id}/commands", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("Bot {}", self.token),
        )
    }

    async fn send(&self, request: RequestBuilder) -> RestResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(RestError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RestError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RestResult<T> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(RestError::decode)
    }
}

#[async_trait]
impl InteractionRestClient for DiscordRestClient {
    async fn create_global_command(
        &self,
        application_id: &str,
        schema: &ApplicationCommandSchema,
    ) -> RestResult<RegisteredCommand> {
        debug!(application_id, command = %schema.name, "POST global command");
        self.send_json(self.client.post(self.commands_url(application_id)).json(schema))
            .await
    }

    async fn delete_global_command(
        &self,
        application_id: &str,
        command_id: &str,
    ) -> RestResult<()> {
        debug!(application_id, command_id, "DELETE global command");
        let url = format!("{}/{command_id}", self.commands_url(application_id));
        self.send(self.client.delete(url)).await.map(|_| ())
    }

    async fn list_global_commands(
        &self,
        application_id: &str,
    ) -> RestResult<Vec<RegisteredCommand>> {
        self.send_json(self.client.get(self.commands_url(application_id)))
            .await
    }

    async fn edit_original_response(
        &self,
        application_id: &str,
        token: &str,
        body: &WebhookEditBody,
    ) -> RestResult<()> {
        debug!(application_id, "PATCH original interaction response");
        let url = format!(
            "{}/webhooks/{application_id}/{token}/messages/@original",
            self.base_url
        );
        self.send(self.client.patch(url).json(body))
            .await
            .map(|_| ())
    }
}
