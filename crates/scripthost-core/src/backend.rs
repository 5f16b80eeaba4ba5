//! The seam between the host and its compiler backends.
//!
//! A backend implements [`Language`] for one script dialect. The host never
//! parses script text itself: it assembles a [`CompileRequest`], hands it to
//! the language, and drives whatever [`CompiledUnit`] comes back.

use crate::{BackendError, CallError, CompilerFlags, Diagnostics, QualifiedName};

/// Values passed into and returned from script entry points.
pub type Value = serde_json::Value;

/// Everything a backend needs to compile one script.
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    /// The complete script text, import header included.
    pub source: &'a str,
    /// Namespace used to qualify the unit's modules.
    pub namespace: &'a str,
    /// Referenced library identifiers, in insertion order (duplicates kept).
    pub references: &'a [String],
    /// Options fixed at host construction.
    pub flags: CompilerFlags,
}

/// Outcome of a compile that actually ran.
///
/// A compile succeeded when `diagnostics` is empty; backends should only
/// return a unit in that case, and the host ignores any unit returned
/// alongside diagnostics.
pub struct CompileOutput {
    pub diagnostics: Diagnostics,
    pub unit: Option<Box<dyn CompiledUnit>>,
}

impl CompileOutput {
    /// A successful compile.
    pub fn success(unit: Box<dyn CompiledUnit>) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            unit: Some(unit),
        }
    }

    /// A failed compile.
    pub fn failure(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics,
            unit: None,
        }
    }
}

/// A statically callable method exported by a compiled unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMethod {
    /// Qualified name of the module declaring the method.
    pub module: QualifiedName,
    /// Method name as scripts and callers spell it.
    pub name: String,
    /// Number of parameters.
    pub arity: usize,
    /// Backend-specific handle used to call the method.
    pub symbol: String,
}

/// An executable artifact produced by a successful compile.
pub trait CompiledUnit {
    /// Lists every method callers may invoke. Called once per compile.
    fn exports(&self) -> Vec<ExportedMethod>;

    /// Calls an exported method statically with the given arguments.
    fn call(&self, method: &ExportedMethod, args: &[Value]) -> Result<Value, CallError>;
}

/// A script dialect together with the backend that compiles it.
pub trait Language {
    /// Display name of the dialect.
    fn name(&self) -> &str;

    /// Whether `name` is a syntactically valid identifier in this dialect.
    fn is_valid_identifier(&self, name: &str) -> bool;

    /// The statement importing `namespace`, including the trailing line break.
    fn import_statement(&self, namespace: &str) -> String;

    /// Compiles a script.
    ///
    /// Problems in the script are reported as diagnostics inside the returned
    /// [`CompileOutput`]; `Err` is reserved for the backend failing to run.
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, BackendError>;
}
