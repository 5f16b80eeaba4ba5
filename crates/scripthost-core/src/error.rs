//! Error types for the script host.
//!
//! ## Error Hierarchy
//!
//! ```text
//! HostError (returned to the application)
//! ├── UnknownLanguage     - construction with an unrecognized language id
//! ├── Backend             - the compiler backend could not run at all (BackendError)
//! ├── NotRunning          - invocation before any successful compile
//! ├── TypeNotFound        - module lookup failed (argument-list invocation)
//! ├── MethodNotFound      - method lookup failed (argument-list invocation)
//! ├── EntryPointNotFound  - module or method missing (entry-point invocation)
//! ├── SignatureNotFound   - neither entry-point signature exists
//! ├── ScriptRuntime       - the script itself failed (wraps ScriptFailure)
//! └── Call                - the call mechanism failed (wraps CallError)
//!
//! CallError (returned by a compiled unit for a single call)
//! ├── ParameterCount      - no overload takes that many arguments
//! ├── Invocation          - the called code raised a failure
//! └── Other               - the call mechanism failed for another reason
//! ```
//!
//! Invalid identifiers are not errors: environment operations report them by
//! returning `false`. Compile diagnostics are not errors either; they are
//! reported through the host's notification channel.

use thiserror::Error;

use crate::ScriptFailure;

/// Errors surfaced by the script host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The language identifier given at construction is not registered.
    #[error("unknown script language '{language}'")]
    UnknownLanguage { language: String },

    /// The backend could not be invoked at all.
    #[error("a compiler backend exception occurred: {0}")]
    Backend(#[from] BackendError),

    /// Invocation was attempted before any successful compile.
    #[error("engine isn't running")]
    NotRunning,

    /// The module type could not be found in the compiled unit.
    #[error("a compiler exception occurred: type '{type_name}' not found")]
    TypeNotFound { type_name: String },

    /// The module exists, but has no method with this name.
    #[error("method not found")]
    MethodNotFound { method: String },

    /// The module or the method of an entry point does not exist.
    #[error("entry point (method \"{method}\" in module \"{module}\") not found")]
    EntryPointNotFound { module: String, method: String },

    /// The entry point exists, but takes neither a string list nor no arguments.
    #[error(
        "entry point (method \"{method}\" in module \"{module}\"), with either no arguments or a list of string arguments, not found"
    )]
    SignatureNotFound { module: String, method: String },

    /// The invoked script code failed.
    #[error("{message}")]
    ScriptRuntime {
        message: String,
        #[source]
        source: Option<ScriptFailure>,
    },

    /// The call could not be made, e.g. no overload takes the given arguments.
    #[error("{0}")]
    Call(CallError),
}

impl HostError {
    /// Returns `true` for failures raised by script code.
    pub fn is_script_runtime(&self) -> bool {
        matches!(self, HostError::ScriptRuntime { .. })
    }

    /// Returns `true` for the entry-point lookup failures.
    pub fn is_entry_point_not_found(&self) -> bool {
        matches!(
            self,
            HostError::EntryPointNotFound { .. } | HostError::SignatureNotFound { .. }
        )
    }
}

/// Fatal failures of a compiler backend.
///
/// These are distinct from compile diagnostics: a backend error means no
/// compile took place at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend or one of its resources is not available.
    #[error("{0}")]
    Unavailable(String),

    /// The backend cannot honour the requested compiler flags.
    #[error("unsupported compiler flags: {0}")]
    UnsupportedFlags(String),
}

/// Failure of a single call into a compiled unit.
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// No overload of the method takes this many arguments.
    #[error("parameter count mismatch ({actual} arguments)")]
    ParameterCount { actual: usize },

    /// The called code raised a failure. The payload is the failure reported by
    /// the call mechanism, whose cause is what the script raised.
    #[error("{0}")]
    Invocation(ScriptFailure),

    /// The call mechanism itself failed.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn entry_point_messages_name_module_and_method() {
        let err = HostError::EntryPointNotFound {
            module: "Checks".into(),
            method: "Run".into(),
        };
        assert_eq!(
            err.to_string(),
            "entry point (method \"Run\" in module \"Checks\") not found"
        );

        let err = HostError::SignatureNotFound {
            module: "Checks".into(),
            method: "Run".into(),
        };
        assert!(err.to_string().contains("with either no arguments"));
        assert!(err.is_entry_point_not_found());
    }

    #[test]
    fn backend_error_converts() {
        let err: HostError = BackendError::Unavailable("engine missing".into()).into();
        assert_eq!(
            err.to_string(),
            "a compiler backend exception occurred: engine missing"
        );
    }

    #[test]
    fn script_runtime_exposes_source() {
        let err = HostError::ScriptRuntime {
            message: "boom".into(),
            source: Some(ScriptFailure::new("raised")),
        };
        assert!(err.is_script_runtime());
        assert_eq!(err.source().unwrap().to_string(), "raised");
    }

    #[test]
    fn call_error_keeps_its_message() {
        let err = HostError::Call(CallError::ParameterCount { actual: 2 });
        assert_eq!(err.to_string(), "parameter count mismatch (2 arguments)");
        assert!(!err.is_script_runtime());
    }

    #[test]
    fn not_running_message() {
        assert_eq!(HostError::NotRunning.to_string(), "engine isn't running");
    }
}
