//! Unified error interface for TERN.
//!
//! Every error type in the workspace implements [`ErrorCode`], giving
//! the rest of the system two things it can rely on without knowing
//! the concrete type:
//!
//! - **Machine-readable codes** for programmatic handling and logs
//! - **Recoverability info** for retry decisions
//!
//! # Code Convention
//!
//! Codes are UPPER_SNAKE_CASE with a per-crate prefix:
//!
//! | Crate | Prefix | Example |
//! |-------|--------|---------|
//! | tern-event | `EVENT_` | `EVENT_EMPTY_COMMAND` |
//! | tern-relay | `RELAY_` | `RELAY_LAGGED` |
//! | tern-capture | `CAPTURE_` | `CAPTURE_SINK_FAILURE` |
//!
//! Codes are stable once defined; changing one is a breaking change.
//!
//! # Example
//!
//! ```
//! use tern_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum SinkFault {
//!     Unreachable,
//!     Rejected(String),
//! }
//!
//! impl ErrorCode for SinkFault {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Unreachable => "SINK_UNREACHABLE",
//!             Self::Rejected(_) => "SINK_REJECTED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Unreachable)
//!     }
//! }
//!
//! let err = SinkFault::Unreachable;
//! assert_eq!(err.code(), "SINK_UNREACHABLE");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface.
///
/// # Recoverability
///
/// An error is recoverable if retrying the operation may succeed or a
/// transient condition may clear (a lagged subscription, a busy sink).
/// Non-recoverable errors require a code or wiring change (a closed
/// bus will not reopen; an empty command name will not fill itself in).
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// UPPER_SNAKE_CASE, prefixed with the owning crate's domain,
    /// stable across versions.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows TERN conventions.
///
/// # Checks
///
/// 1. Code is not empty
/// 2. Code starts with the expected prefix
/// 3. Code is UPPER_SNAKE_CASE
///
/// # Panics
///
/// Panics with a descriptive message if validation fails. Intended for
/// use in tests.
///
/// # Example
///
/// ```
/// use tern_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Lagged;
///
/// impl ErrorCode for Lagged {
///     fn code(&self) -> &'static str { "RELAY_LAGGED" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Lagged, "RELAY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum in one test.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl ErrorCode for TestError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "TEST_TRANSIENT",
                Self::Permanent => "TEST_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn error_code_trait() {
        assert_eq!(TestError::Transient.code(), "TEST_TRANSIENT");
        assert!(TestError::Transient.is_recoverable());
        assert!(!TestError::Permanent.is_recoverable());
    }

    #[test]
    fn assert_error_code_valid() {
        assert_error_code(&TestError::Transient, "TEST_");
    }

    #[test]
    fn assert_error_codes_all_variants() {
        assert_error_codes(&[TestError::Transient, TestError::Permanent], "TEST_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn assert_error_code_wrong_prefix() {
        assert_error_code(&TestError::Transient, "WRONG_");
    }

    #[test]
    fn upper_snake_case_accepts() {
        assert!(is_upper_snake_case("RELAY_LAGGED"));
        assert!(is_upper_snake_case("A_B_C"));
        assert!(is_upper_snake_case("CODE_2"));
    }

    #[test]
    fn upper_snake_case_rejects() {
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("relay_lagged"));
        assert!(!is_upper_snake_case("_RELAY"));
        assert!(!is_upper_snake_case("RELAY_"));
        assert!(!is_upper_snake_case("RELAY__LAGGED"));
    }
}
