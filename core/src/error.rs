//! Error types for flag registration and argument parsing.
//!
//! A single error type covers both phases: registration conflicts reported
//! by [`Command::add_flags`](crate::Command::add_flags) and the failures a
//! [`Context::parse`](crate::Context::parse) call can abort with.

use thiserror::Error;

/// Error returned by user-supplied hooks (parsers and validators).
///
/// Anything convertible into a boxed error works, so hooks can use `?` on
/// standard parse errors or return `Err("message".into())`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while registering flags or parsing arguments.
#[derive(Debug, Error)]
pub enum Error {
    /// A flag with the same name is already registered on the command.
    #[error("flag '{0}' is already declared")]
    DuplicateFlagName(String),

    /// An option string is already mapped to another flag on the command.
    #[error("option '{option}' is already declared for flag '{flag}'")]
    DuplicateOption {
        /// The conflicting option string.
        option: String,
        /// Name of the flag that already owns the option.
        flag: String,
    },

    /// An option-like token matched no option of the current command.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A flag that takes an argument was the last token.
    #[error("expected argument for '{0}'")]
    MissingArgument(String),

    /// A parser rejected the raw argument.
    #[error("invalid argument for '{option}': {source}")]
    ParseError {
        /// The option token that selected the flag.
        option: String,
        /// Error reported by the parser.
        source: BoxError,
    },

    /// A per-occurrence validator rejected a value.
    #[error("invalid value for flag '{flag}': {source}")]
    ValidateError {
        /// Name of the flag.
        flag: String,
        /// Error reported by the validator.
        source: BoxError,
    },

    /// A post-validator rejected the final value of a flag.
    #[error("final value of flag '{flag}' is invalid: {source}")]
    PostValidateError {
        /// Name of the flag.
        flag: String,
        /// Error reported by the post-validator.
        source: BoxError,
    },

    /// A required flag got no value from argv, environment or default.
    #[error("missing required flag '{0}'")]
    MissingRequired(String),
}

impl Error {
    /// Returns `true` for errors raised while registering flags.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateFlagName(_) | Self::DuplicateOption { .. }
        )
    }
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::DuplicateOption {
            option: "-v".to_string(),
            flag: "verbose".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "option '-v' is already declared for flag 'verbose'"
        );
        assert_eq!(
            Error::MissingArgument("--count".to_string()).to_string(),
            "expected argument for '--count'"
        );
    }

    #[test]
    fn test_hook_error_is_source() {
        let err = Error::ValidateError {
            flag: "type".to_string(),
            source: "must be one of: a, b".into(),
        };
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("must be one of: a, b".to_string())
        );
        assert!(!err.is_registration());
        assert!(Error::DuplicateFlagName("x".to_string()).is_registration());
    }
}
