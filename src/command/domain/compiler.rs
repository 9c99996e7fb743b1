//! Option schema compiler.
//!
//! Maps a handler's declared parameter list onto wire-format options. The
//! mapping is a closed `match` over [`DeclaredType`]: anything without an
//! entry is rejected at load time.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use super::name::{validate_description, validate_name};
use super::{
    ChoiceRestriction, ChoiceValue, CommandOption, ContextKind, DeclaredType, HandlerSignature,
    OptionChoice, OptionKind, ParameterDeclaration, SchemaCompileError,
};

/// Result of compiling a handler signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSignature {
    context: ContextKind,
    options: Vec<CommandOption>,
    defaults: BTreeMap<String, Value>,
}

impl CompiledSignature {
    /// Returns the context kind declared by the first parameter.
    #[must_use]
    pub const fn context(&self) -> ContextKind {
        self.context
    }

    /// Returns `true` when the handler takes a deferred context.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self.context, ContextKind::Deferred)
    }

    /// Returns the derived options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Returns default values keyed by option name.
    #[must_use]
    pub const fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.defaults
    }

    /// Splits the compiled signature into its parts.
    #[must_use]
    pub fn into_parts(self) -> (ContextKind, Vec<CommandOption>, BTreeMap<String, Value>) {
        (self.context, self.options, self.defaults)
    }
}

/// Compiles the signature of the handler behind `command`.
///
/// The first parameter must be a context type and is excluded from the
/// derived options. Every following parameter becomes one option; it is
/// required exactly when it has no default value.
///
/// # Errors
///
/// Returns [`SchemaCompileError`] when the context parameter is missing or
/// misplaced, a type has no option kind, a choice restriction is malformed,
/// a required parameter follows an optional one, or a name is invalid.
pub fn compile_signature(
    command: &str,
    signature: &HandlerSignature,
) -> Result<CompiledSignature, SchemaCompileError> {
    let missing_context = || SchemaCompileError::MissingContextParameter {
        command: command.to_owned(),
    };
    let (first, rest) = signature
        .parameters()
        .split_first()
        .ok_or_else(missing_context)?;
    let context = first
        .declared_type()
        .context_kind()
        .ok_or_else(missing_context)?;

    let mut names = HashSet::new();
    let mut seen_optional = false;
    let mut options = Vec::with_capacity(rest.len());
    let mut defaults = BTreeMap::new();

    for parameter in rest {
        let name = parameter.name();
        if parameter.declared_type().context_kind().is_some() {
            return Err(SchemaCompileError::MisplacedContextParameter {
                command: command.to_owned(),
                parameter: name.to_owned(),
            });
        }
        validate_name(name)?;
        if !names.insert(name) {
            return Err(SchemaCompileError::DuplicateParameter {
                command: command.to_owned(),
                parameter: name.to_owned(),
            });
        }

        let required = parameter.default_value().is_none();
        if required && seen_optional {
            return Err(SchemaCompileError::RequiredAfterOptional {
                command: command.to_owned(),
                parameter: name.to_owned(),
            });
        }
        seen_optional |= !required;

        let (kind, choices) = map_parameter(command, parameter)?;
        let description = parameter.description().unwrap_or(name);
        validate_description(name, description)?;

        options.push(CommandOption::new(kind, name, description, required).with_choices(choices));
        if let Some(default) = parameter.default_value() {
            defaults.insert(name.to_owned(), default.clone());
        }
    }

    Ok(CompiledSignature {
        context,
        options,
        defaults,
    })
}

fn map_parameter(
    command: &str,
    parameter: &ParameterDeclaration,
) -> Result<(OptionKind, Vec<OptionChoice>), SchemaCompileError> {
    match parameter.declared_type() {
        DeclaredType::Choice(restriction) => compile_choice(command, parameter.name(), restriction),
        other => primitive_kind(other)
            .map(|kind| (kind, Vec::new()))
            .ok_or_else(|| SchemaCompileError::UnsupportedType {
                command: command.to_owned(),
                parameter: parameter.name().to_owned(),
                type_name: other.to_string(),
            }),
    }
}

const fn primitive_kind(declared_type: &DeclaredType) -> Option<OptionKind> {
    match declared_type {
        DeclaredType::String => Some(OptionKind::String),
        DeclaredType::Integer => Some(OptionKind::Integer),
        DeclaredType::Boolean => Some(OptionKind::Boolean),
        DeclaredType::User => Some(OptionKind::User),
        DeclaredType::Channel => Some(OptionKind::Channel),
        DeclaredType::Role => Some(OptionKind::Role),
        DeclaredType::Mentionable => Some(OptionKind::Mentionable),
        DeclaredType::ImmediateContext
        | DeclaredType::DeferredContext
        | DeclaredType::Float
        | DeclaredType::List(_)
        | DeclaredType::Other(_)
        | DeclaredType::Choice(_) => None,
    }
}

fn compile_choice(
    command: &str,
    parameter: &str,
    restriction: &ChoiceRestriction,
) -> Result<(OptionKind, Vec<OptionChoice>), SchemaCompileError> {
    let kind = match restriction.inner() {
        DeclaredType::String => OptionKind::String,
        DeclaredType::Integer => OptionKind::Integer,
        DeclaredType::Choice(_) => {
            return Err(SchemaCompileError::NestedChoice {
                command: command.to_owned(),
                parameter: parameter.to_owned(),
            });
        }
        other => {
            return Err(SchemaCompileError::InvalidChoiceType {
                command: command.to_owned(),
                parameter: parameter.to_owned(),
                type_name: other.to_string(),
            });
        }
    };

    if restriction.choices().is_empty() {
        return Err(SchemaCompileError::EmptyChoices {
            command: command.to_owned(),
            parameter: parameter.to_owned(),
        });
    }

    let choices = restriction
        .choices()
        .iter()
        .map(|choice| match (kind, &choice.value) {
            (OptionKind::Integer, ChoiceValue::String(_)) => {
                Err(SchemaCompileError::ChoiceValueMismatch {
                    command: command.to_owned(),
                    parameter: parameter.to_owned(),
                    label: choice.name.clone(),
                })
            }
            _ => Ok(choice.clone()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((kind, choices))
}
