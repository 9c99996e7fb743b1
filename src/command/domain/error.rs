//! Error types for schema compilation, registry construction and lookup.

use thiserror::Error;

/// Errors raised while compiling a handler signature into a command schema.
///
/// These are load-time failures; a process that hits one must not start
/// serving requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaCompileError {
    /// The signature has no leading context parameter.
    #[error("handler for '{command}' must take an interaction context as its first parameter")]
    MissingContextParameter {
        /// Command name.
        command: String,
    },

    /// A context type appears after the first position.
    #[error("context parameter '{parameter}' of '{command}' must be the first parameter")]
    MisplacedContextParameter {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
    },

    /// The declared type has no option kind.
    #[error("parameter '{parameter}' of '{command}' has unsupported type '{type_name}'")]
    UnsupportedType {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
        /// Display form of the declared type.
        type_name: String,
    },

    /// A choice restriction wraps another choice restriction.
    #[error("parameter '{parameter}' of '{command}' nests a choice restriction inside another")]
    NestedChoice {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
    },

    /// A choice restriction wraps a type other than string or integer.
    #[error(
        "parameter '{parameter}' of '{command}' restricts '{type_name}'; only str and int accept choices"
    )]
    InvalidChoiceType {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
        /// Display form of the wrapped type.
        type_name: String,
    },

    /// A choice restriction has no choices.
    #[error("parameter '{parameter}' of '{command}' declares a choice restriction without choices")]
    EmptyChoices {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
    },

    /// A choice value does not match the restricted type.
    #[error("choice '{label}' of parameter '{parameter}' in '{command}' has the wrong value type")]
    ChoiceValueMismatch {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
        /// Choice label.
        label: String,
    },

    /// A required parameter follows one with a default value.
    #[error("required parameter '{parameter}' of '{command}' follows a parameter with a default")]
    RequiredAfterOptional {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
    },

    /// Two parameters share a name.
    #[error("parameter '{parameter}' of '{command}' is declared twice")]
    DuplicateParameter {
        /// Command name.
        command: String,
        /// Offending parameter name.
        parameter: String,
    },

    /// A command, group or option name breaks the platform naming rules.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Validation reason.
        reason: String,
    },

    /// A description is empty or too long.
    #[error("invalid description for '{name}': {reason}")]
    InvalidDescription {
        /// Owner of the description.
        name: String,
        /// Validation reason.
        reason: String,
    },
}

/// Errors raised while assembling groups and the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two entries share a name within one scope.
    #[error("duplicate name '{name}' in {scope}")]
    DuplicateName {
        /// Scope description, such as `registry` or `group 'hoggit'`.
        scope: String,
        /// Duplicated name.
        name: String,
    },

    /// A sub-command group would contain another sub-command group.
    #[error("group '{child}' cannot be nested in '{parent}': it already contains groups")]
    GroupTooDeep {
        /// Parent group name.
        parent: String,
        /// Child group name.
        child: String,
    },

    /// A group holds neither commands nor child groups.
    #[error("group '{0}' has no commands")]
    EmptyGroup(String),

    /// A declaration failed to compile.
    #[error(transparent)]
    Schema(#[from] SchemaCompileError),
}

/// Errors raised while resolving a submitted option tree to a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No root command or group has the requested name.
    #[error("unknown command '{0}'")]
    UnknownTarget(String),

    /// A group has no command or child group with the selected name.
    #[error("'{name}' was not found in group '{group}'")]
    NotFound {
        /// Group searched.
        group: String,
        /// Selected name.
        name: String,
    },

    /// A group level did not carry exactly one selected option.
    #[error("group '{group}' expects exactly one selected option, got {count}")]
    SelectionCount {
        /// Group searched.
        group: String,
        /// Number of submitted options at that level.
        count: usize,
    },
}
