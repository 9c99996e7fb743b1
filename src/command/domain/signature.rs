//! Declared handler signatures.
//!
//! A handler describes its parameters as an ordered list of
//! [`ParameterDeclaration`] values. The first entry is always the context
//! parameter; the remaining entries become command options once compiled by
//! [`super::compile_signature`].

use serde_json::Value;
use std::fmt;

use super::{ChoiceValue, OptionChoice};

/// Which interaction context a handler receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Handler produces its reply synchronously.
    Immediate,
    /// Handler is acknowledged first and updates the reply later.
    Deferred,
}

/// A parameter type as declared by a handler.
///
/// The enum covers every type a handler can name, including host types with
/// no option mapping (`Float`, `List`, `Other`). The schema compiler rejects
/// those rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Immediate interaction context.
    ImmediateContext,
    /// Deferred interaction context.
    DeferredContext,
    /// Primitive string.
    String,
    /// Primitive integer.
    Integer,
    /// Primitive boolean.
    Boolean,
    /// Platform user reference.
    User,
    /// Platform channel reference.
    Channel,
    /// Platform role reference.
    Role,
    /// Platform user-or-role reference.
    Mentionable,
    /// Floating-point number.
    Float,
    /// Homogeneous list.
    List(Box<Self>),
    /// Any other named host type.
    Other(String),
    /// Primitive restricted to a fixed set of labelled values.
    Choice(ChoiceRestriction),
}

impl DeclaredType {
    /// Returns the context kind when this is a context type.
    #[must_use]
    pub const fn context_kind(&self) -> Option<ContextKind> {
        match self {
            Self::ImmediateContext => Some(ContextKind::Immediate),
            Self::DeferredContext => Some(ContextKind::Deferred),
            _ => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImmediateContext => f.write_str("InteractionContext"),
            Self::DeferredContext => f.write_str("DeferredInteractionContext"),
            Self::String => f.write_str("str"),
            Self::Integer => f.write_str("int"),
            Self::Boolean => f.write_str("bool"),
            Self::User => f.write_str("User"),
            Self::Channel => f.write_str("Channel"),
            Self::Role => f.write_str("Role"),
            Self::Mentionable => f.write_str("Mentionable"),
            Self::Float => f.write_str("float"),
            Self::List(inner) => write!(f, "List[{inner}]"),
            Self::Other(name) => f.write_str(name),
            Self::Choice(restriction) => write!(f, "Choice[{}]", restriction.inner),
        }
    }
}

/// A primitive type restricted to an ordered set of labelled values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRestriction {
    inner: Box<DeclaredType>,
    choices: Vec<OptionChoice>,
}

impl ChoiceRestriction {
    /// Creates a restriction over `inner` from `(label, value)` pairs.
    ///
    /// Insertion order is preserved.
    #[must_use]
    pub fn new<L, V>(inner: DeclaredType, choices: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<ChoiceValue>,
    {
        Self {
            inner: Box::new(inner),
            choices: choices
                .into_iter()
                .map(|(label, value)| OptionChoice::new(label, value))
                .collect(),
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &DeclaredType {
        &self.inner
    }

    /// Returns the ordered choices.
    #[must_use]
    pub fn choices(&self) -> &[OptionChoice] {
        &self.choices
    }
}

/// Rust types that can appear as handler parameters.
///
/// Implemented for the primitives here and for the platform entity types in
/// [`crate::interaction::domain`].
pub trait ArgumentType {
    /// Returns the declared type for this Rust type.
    fn declared_type() -> DeclaredType;
}

impl ArgumentType for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::String
    }
}

impl ArgumentType for i64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Integer
    }
}

impl ArgumentType for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Boolean
    }
}

impl ArgumentType for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Float
    }
}

impl<T: ArgumentType> ArgumentType for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::List(Box::new(T::declared_type()))
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    name: String,
    declared_type: DeclaredType,
    default: Option<Value>,
    description: Option<String>,
}

impl ParameterDeclaration {
    /// Declares a parameter with an explicit type.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default: None,
            description: None,
        }
    }

    /// Declares a parameter whose type is taken from a Rust type.
    #[must_use]
    pub fn of<T: ArgumentType>(name: impl Into<String>) -> Self {
        Self::new(name, T::declared_type())
    }

    /// Declares a choice-restricted parameter.
    #[must_use]
    pub fn choice(name: impl Into<String>, restriction: ChoiceRestriction) -> Self {
        Self::new(name, DeclaredType::Choice(restriction))
    }

    /// Declares the leading context parameter.
    #[must_use]
    pub fn context(kind: ContextKind) -> Self {
        let declared_type = match kind {
            ContextKind::Immediate => DeclaredType::ImmediateContext,
            ContextKind::Deferred => DeclaredType::DeferredContext,
        };
        Self::new("ctx", declared_type)
    }

    /// Gives the parameter a default value, making the option optional.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the option description shown by the platform.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the description, if one was set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Ordered parameter list of a handler, context parameter first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSignature {
    parameters: Vec<ParameterDeclaration>,
}

impl HandlerSignature {
    /// Starts a signature whose handler takes an immediate context.
    #[must_use]
    pub fn immediate() -> Self {
        Self::with_context(ContextKind::Immediate)
    }

    /// Starts a signature whose handler takes a deferred context.
    #[must_use]
    pub fn deferred() -> Self {
        Self::with_context(ContextKind::Deferred)
    }

    /// Starts a signature with the given context parameter.
    #[must_use]
    pub fn with_context(kind: ContextKind) -> Self {
        Self {
            parameters: vec![ParameterDeclaration::context(kind)],
        }
    }

    /// Builds a signature from a raw parameter list.
    ///
    /// No validation happens here; the schema compiler rejects malformed
    /// lists.
    #[must_use]
    pub fn from_parameters(parameters: impl IntoIterator<Item = ParameterDeclaration>) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns every parameter, context included.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }
}
