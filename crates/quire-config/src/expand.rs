//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${QUIRE_EXPAND_UNSET:-fallback}", "f").unwrap(),
            "fallback"
        );
        assert_eq!(expand_env("${QUIRE_EXPAND_UNSET:-}", "f").unwrap(), "");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_EXPAND_MISSING");
        }
        let err = expand_env("${QUIRE_EXPAND_MISSING}", "chat.api_key").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("QUIRE_EXPAND_MISSING"));
        assert!(msg.contains("chat.api_key"));
    }
}
