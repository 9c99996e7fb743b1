//! Platform naming rules for commands, groups and options.

use super::SchemaCompileError;

/// Maximum length of a command, group or option name.
const MAX_NAME_LENGTH: usize = 32;

/// Maximum length of a description.
const MAX_DESCRIPTION_LENGTH: usize = 100;

/// Checks a command, group or option name.
///
/// Names are 1 to 32 characters of lowercase letters, digits, `-` or `_`.
///
/// # Errors
///
/// Returns [`SchemaCompileError::InvalidName`] when the name breaks a rule.
pub fn validate_name(name: &str) -> Result<(), SchemaCompileError> {
    let length = name.chars().count();
    if length == 0 {
        return Err(invalid_name(name, "name must not be empty"));
    }
    if length > MAX_NAME_LENGTH {
        return Err(invalid_name(name, "name exceeds 32 characters"));
    }

    let is_valid = name
        .chars()
        .all(|c| matches!(c, '-' | '_') || (c.is_alphanumeric() && !c.is_uppercase()));
    if !is_valid {
        return Err(invalid_name(
            name,
            "only lowercase letters, digits, '-' and '_' are allowed",
        ));
    }

    Ok(())
}

/// Checks a description owned by `name`.
///
/// # Errors
///
/// Returns [`SchemaCompileError::InvalidDescription`] when the description is
/// blank or longer than 100 characters.
pub fn validate_description(name: &str, description: &str) -> Result<(), SchemaCompileError> {
    if description.trim().is_empty() {
        return Err(SchemaCompileError::InvalidDescription {
            name: name.to_owned(),
            reason: "description must not be empty".to_owned(),
        });
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(SchemaCompileError::InvalidDescription {
            name: name.to_owned(),
            reason: "description exceeds 100 characters".to_owned(),
        });
    }
    Ok(())
}

fn invalid_name(name: &str, reason: &str) -> SchemaCompileError {
    SchemaCompileError::InvalidName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    }
}
