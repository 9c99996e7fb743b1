//! Pushes the registry's command schemas to the platform.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::command::domain::{ApplicationCommandSchema, CommandRegistry, RegisteredCommand};
use crate::interaction::ports::{InteractionRestClient, RestError};

/// Errors raised while synchronizing commands.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing the remote commands failed.
    #[error("failed to list global commands: {0}")]
    List(#[source] RestError),

    /// Deleting a stale remote command failed.
    #[error("failed to delete global command '{name}': {source}")]
    Delete {
        /// Remote command name.
        name: String,
        /// REST failure.
        #[source]
        source: RestError,
    },

    /// Creating a local command remotely failed.
    #[error("failed to create global command '{name}': {source}")]
    Create {
        /// Local command name.
        name: String,
        /// REST failure.
        #[source]
        source: RestError,
    },
}

/// Outcome of a synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Names created or overwritten on the platform.
    pub created: Vec<String>,
    /// Names removed from the platform.
    pub deleted: Vec<String>,
}

/// Registers the local command tree as the application's global commands.
#[derive(Clone)]
pub struct CommandSynchronizer {
    registry: Arc<CommandRegistry>,
    rest: Arc<dyn InteractionRestClient>,
}

impl CommandSynchronizer {
    /// Creates a synchronizer.
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>, rest: Arc<dyn InteractionRestClient>) -> Self {
        Self { registry, rest }
    }

    /// Deletes remote commands that are no longer declared, then creates
    /// every declared command.
    ///
    /// Creating an existing name overwrites it on the platform, so repeated
    /// runs converge.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on the first REST failure; earlier changes are
    /// not rolled back.
    pub async fn sync(&self, application_id: &str) -> Result<SyncReport, SyncError> {
        let schemas = self.registry.schemas();
        let declared: HashSet<&str> = schemas.iter().map(|schema| schema.name.as_str()).collect();

        let remote = self
            .rest
            .list_global_commands(application_id)
            .await
            .map_err(SyncError::List)?;

        let stale: Vec<&RegisteredCommand> = remote
            .iter()
            .filter(|command| !declared.contains(command.name.as_str()))
            .collect();
        let report = SyncReport {
            deleted: self.delete_stale(application_id, &stale).await?,
            created: self.create_declared(application_id, &schemas).await?,
        };

        info!(
            application_id,
            created = report.created.len(),
            deleted = report.deleted.len(),
            "global commands synchronized"
        );
        Ok(report)
    }

    async fn delete_stale(
        &self,
        application_id: &str,
        stale: &[&RegisteredCommand],
    ) -> Result<Vec<String>, SyncError> {
        let mut deleted = Vec::with_capacity(stale.len());
        for command in stale {
            debug!(
                command = %command.name,
                command_id = %command.id,
                "deleting stale global command"
            );
            self.rest
                .delete_global_command(application_id, &command.id)
                .await
                .map_err(|source| SyncError::Delete {
                    name: command.name.clone(),
                    source,
                })?;
            deleted.push(command.name.clone());
        }
        Ok(deleted)
    }

    async fn create_declared(
        &self,
        application_id: &str,
        schemas: &[ApplicationCommandSchema],
    ) -> Result<Vec<String>, SyncError> {
        let mut created = Vec::with_capacity(schemas.len());
        for schema in schemas {
            debug!(command = %schema.name, "creating global command");
            self.rest
                .create_global_command(application_id, schema)
                .await
                .map_err(|source| SyncError::Create {
                    name: schema.name.clone(),
                    source,
                })?;
            created.push(schema.name.clone());
        }
        Ok(created)
    }
}
