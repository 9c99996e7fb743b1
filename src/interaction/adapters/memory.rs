//! In-memory REST client that records calls.
//!
//! Models the platform's global command list and captures every edit of an
//! original response. Suitable for unit and integration tests and for
//! running the webhook locally without platform credentials.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::command::domain::{ApplicationCommandSchema, RegisteredCommand};
use crate::interaction::domain::WebhookEditBody;
use crate::interaction::ports::{InteractionRestClient, RestError, RestResult};

/// One recorded edit of an original response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEdit {
    /// Application the edit targeted.
    pub application_id: String,
    /// Continuation token used.
    pub token: String,
    /// Edit body.
    pub body: WebhookEditBody,
}

/// In-memory [`InteractionRestClient`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRestClient {
    state: Arc<RwLock<RecordingState>>,
    edited: Arc<Notify>,
}

#[derive(Debug, Default)]
struct RecordingState {
    remote: Vec<RegisteredCommand>,
    created: Vec<ApplicationCommandSchema>,
    deleted: Vec<String>,
    edits: Vec<RecordedEdit>,
    next_id: u64,
    edit_failure: Option<RestError>,
}

impl RecordingRestClient {
    /// Creates a client with no remote commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose remote command list starts with `commands`.
    #[must_use]
    pub fn with_remote_commands(commands: Vec<RegisteredCommand>) -> Self {
        let state = RecordingState {
            remote: commands,
            ..RecordingState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            edited: Arc::default(),
        }
    }

    /// Makes every following edit fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub fn fail_edits_with(&self, error: RestError) -> RestResult<()> {
        self.write()?.edit_failure = Some(error);
        Ok(())
    }

    /// Returns the commands currently registered remotely.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub fn remote_commands(&self) -> RestResult<Vec<RegisteredCommand>> {
        Ok(self.read()?.remote.clone())
    }

    /// Returns every schema passed to `create_global_command`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub fn created(&self) -> RestResult<Vec<ApplicationCommandSchema>> {
        Ok(self.read()?.created.clone())
    }

    /// Returns every command ID passed to `delete_global_command`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub fn deleted(&self) -> RestResult<Vec<String>> {
        Ok(self.read()?.deleted.clone())
    }

    /// Returns the edits recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub fn edits(&self) -> RestResult<Vec<RecordedEdit>> {
        Ok(self.read()?.edits.clone())
    }

    /// Waits until at least `count` edits were recorded or `timeout` passes,
    /// then returns the edits recorded so far.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] when the state lock is poisoned.
    pub async fn wait_for_edits(
        &self,
        count: usize,
        timeout: Duration,
    ) -> RestResult<Vec<RecordedEdit>> {
        let deadline = Instant::now() + timeout;
        loop {
            let notified = self.edited.notified();
            let edits = self.edits()?;
            if edits.len() >= count {
                return Ok(edits);
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.edits();
            }
        }
    }

    fn read(&self) -> RestResult<RwLockReadGuard<'_, RecordingState>> {
        self.state
            .read()
            .map_err(|err| RestError::Transport(err.to_string()))
    }

    fn write(&self) -> RestResult<RwLockWriteGuard<'_, RecordingState>> {
        self.state
            .write()
            .map_err(|err| RestError::Transport(err.to_string()))
    }
}

#[async_trait]
impl InteractionRestClient for RecordingRestClient {
    async fn create_global_command(
        &self,
        application_id: &str,
        schema: &ApplicationCommandSchema,
    ) -> RestResult<RegisteredCommand> {
        let mut state = self.write()?;
        state.next_id += 1;
        let registered = RegisteredCommand {
            id: state.next_id.to_string(),
            application_id: application_id.to_owned(),
            name: schema.name.clone(),
            description: schema.description.clone(),
            options: schema.options.clone(),
        };
        state.remote.retain(|command| command.name != schema.name);
        state.remote.push(registered.clone());
        state.created.push(schema.clone());
        Ok(registered)
    }

    async fn delete_global_command(
        &self,
        _application_id: &str,
        command_id: &str,
    ) -> RestResult<()> {
        let mut state = self.write()?;
        let before = state.remote.len();
        state.remote.retain(|command| command.id != command_id);
        if state.remote.len() == before {
            return Err(RestError::Status {
                status: 404,
                body: format!("unknown command {command_id}"),
            });
        }
        state.deleted.push(command_id.to_owned());
        Ok(())
    }

    async fn list_global_commands(
        &self,
        _application_id: &str,
    ) -> RestResult<Vec<RegisteredCommand>> {
        self.remote_commands()
    }

    async fn edit_original_response(
        &self,
        application_id: &str,
        token: &str,
        body: &WebhookEditBody,
    ) -> RestResult<()> {
        {
            let mut state = self.write()?;
            if let Some(failure) = &state.edit_failure {
                return Err(failure.clone());
            }
            state.edits.push(RecordedEdit {
                application_id: application_id.to_owned(),
                token: token.to_owned(),
                body: body.clone(),
            });
        }
        self.edited.notify_waiters();
        Ok(())
    }
}
