//! Shared builders for command tests.

use std::sync::Arc;

use crate::command::adapters::{deferred_handler, immediate_handler};
use crate::command::domain::{Command, ParameterDeclaration};
use crate::command::ports::CommandHandler;

/// Immediate handler that always replies `ok`.
pub fn replying_handler(
    parameters: impl IntoIterator<Item = ParameterDeclaration>,
) -> Arc<dyn CommandHandler> {
    immediate_handler(parameters, |ctx, _args| async move { Ok(ctx.reply("ok")) })
}

/// Deferred handler that finishes without editing.
pub fn silent_deferred_handler(
    parameters: impl IntoIterator<Item = ParameterDeclaration>,
) -> Arc<dyn CommandHandler> {
    deferred_handler(parameters, |_ctx, _args| async { Ok(()) })
}

/// Builds an immediate command.
pub fn command(name: &str, parameters: impl IntoIterator<Item = ParameterDeclaration>) -> Command {
    Command::new(name, format!("{name} command"), replying_handler(parameters))
        .expect("test command should compile")
}
