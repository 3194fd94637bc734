use crate::domain::{entities::ProjectStructure, error::DomainError};

/// Names the platform toolchains refuse or that shadow core modules.
const RESERVED_NAMES: &[&str] = &["react", "react-native", "test", "node_modules", "app"];

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A project name doubles as the native app name and the directory name:
    /// letters, digits, `-` and `_`, starting with a letter.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(invalid("name must start with a letter"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }
        if name.len() > 214 {
            return Err(invalid("name is longer than 214 characters"));
        }
        if RESERVED_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
            return Err(invalid("name is reserved"));
        }

        Ok(())
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["Foo", "MyShop", "shop-app", "demo_2"] {
            assert!(DomainValidator::validate_project_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "2fast", "my app", "shop.app", "-x", "React", "a/b"] {
            assert!(DomainValidator::validate_project_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn reason_names_the_offending_character() {
        let err = DomainValidator::validate_project_name("my app").unwrap_err();
        assert!(err.to_string().contains("' '"));
    }
}
