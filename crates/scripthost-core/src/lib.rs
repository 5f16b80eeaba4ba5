//! Shared vocabulary of the script host.
//!
//! This crate holds what both sides of the compiler seam need to agree on:
//!
//! - [`Language`] / [`CompiledUnit`]: the traits a compiler backend implements
//! - [`Diagnostics`]: messages reported by a compile
//! - [`HostError`], [`BackendError`], [`CallError`], [`ScriptFailure`]: errors
//! - [`QualifiedName`]: namespace-qualified module names
//! - [`CompilerFlags`]: options fixed when a host is created
//! - [`SourceHash`]: fingerprints of compiled script text

mod backend;
mod diagnostics;
mod error;
mod failure;
mod flags;
mod hash;
mod qualified_name;

pub use backend::{CompileOutput, CompileRequest, CompiledUnit, ExportedMethod, Language, Value};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{BackendError, CallError, HostError};
pub use failure::ScriptFailure;
pub use flags::CompilerFlags;
pub use hash::SourceHash;
pub use qualified_name::QualifiedName;
