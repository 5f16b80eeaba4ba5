//! Compile user scripts at run time and invoke their entry points.
//!
//! A [`ScriptHost`] owns the script text and everything that goes with it
//! into the compiler: library references, namespace imports, host objects.
//! Compiling is delegated to the backend of the host's language; the host
//! only orchestrates and then calls into the compiled unit.
//!
//! ## Modules
//!
//! - [`language`]: language identifiers and the [`LanguageRegistry`]
//! - `environment`: references, imports, global instances and event sources
//! - `compiler`: drives a backend and indexes what it produced
//! - `invoker`: entry-point lookup, the arity fallback, failure translation
//! - `reporter`: the compiler error notification channel
//!
//! The built-in dialects are rhai (`import` statements) and its `imports`
//! flavour, both from [`scripthost_rhai`]. Backends for other dialects
//! implement [`Language`] and are added to a registry.
//!
//! ```
//! use scripthost::ScriptHost;
//! use serde_json::json;
//!
//! let mut host = ScriptHost::new("Rhai", "Validation").unwrap();
//! host.set_source_code("fn Checks__Double(x) { x * 2 }");
//! assert!(host.compile().unwrap());
//!
//! let value = host.invoke_with_args("Checks", "Double", &[json!(21)]).unwrap();
//! assert_eq!(value, json!(42));
//! ```

mod compiler;
mod environment;
mod host;
mod invoker;
pub mod language;
mod reporter;
mod source;

pub use environment::{EventSource, Reference};
pub use host::ScriptHost;
pub use language::LanguageRegistry;
pub use reporter::{CompilerErrorHandler, SubscriptionId};

pub use scripthost_core::{
    BackendError, CallError, CompileOutput, CompileRequest, CompiledUnit, CompilerFlags,
    Diagnostic, DiagnosticKind, Diagnostics, ExportedMethod, HostError, Language, QualifiedName,
    ScriptFailure, SourceHash, Value,
};
pub use scripthost_rhai as rhai;
