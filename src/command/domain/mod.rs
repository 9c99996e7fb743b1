//! Domain model for command schemas and the command registry.
//!
//! Handlers declare their parameters as [`HandlerSignature`] values; the
//! compiler turns those into wire-format [`CommandOption`] lists, and the
//! registry arranges the resulting [`Command`] and [`Group`] values into the
//! tree consulted at dispatch time.

mod command;
mod compiler;
mod error;
mod group;
mod name;
mod option;
mod registry;
mod schema;
mod signature;

pub use command::Command;
pub use compiler::{CompiledSignature, compile_signature};
pub use error::{LookupError, RegistryError, SchemaCompileError};
pub use group::Group;
pub use name::{validate_description, validate_name};
pub use option::{ChoiceValue, CommandOption, OptionChoice, OptionKind, ParseOptionKindError};
pub use registry::{CommandModule, CommandRegistry, RegistryBuilder, RegistryEntry, ResolvedCommand};
pub use schema::{ApplicationCommandSchema, RegisteredCommand};
pub use signature::{
    ArgumentType, ChoiceRestriction, ContextKind, DeclaredType, HandlerSignature,
    ParameterDeclaration,
};
