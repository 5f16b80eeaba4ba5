//! Shared fixtures for the integration tests.
//!
//! Besides rhai, tests drive a small line-based dialect of the `imports`
//! family so that backend failures and multi-diagnostic compiles can be
//! produced on demand:
//!
//! ```text
//! imports System              (import header, ignored)
//! sub Checks.Run/0            (exports Run of module Checks, taking 0 args)
//! sub Checks.Run/1 raises bad (same, but every call fails with "bad")
//! warning <message>           (reports a warning on this line)
//! error <message>             (reports an error on this line)
//! fatal                       (the compiler cannot run at all)
//! ```
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use scripthost::{
    BackendError, CallError, CompileOutput, CompileRequest, CompiledUnit, Diagnostic,
    Diagnostics, ExportedMethod, Language, LanguageRegistry, QualifiedName, ScriptFailure, Value,
};

/// Aliases of the line-based dialect.
pub const LINE_ALIASES: &[&str] = &["VB", "Visual Basic"];

/// Libraries the line-based dialect can resolve.
const KNOWN_LIBRARIES: &[&str] = &["system", "forms", "drawing", "xml"];

/// Every call made into a compiled unit, as (symbol, argument count).
pub type CallLog = Rc<RefCell<Vec<(String, usize)>>>;

#[derive(Default)]
pub struct LineLanguage {
    calls: CallLog,
}

impl LineLanguage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }
}

struct LineMethod {
    method: ExportedMethod,
    raises: Option<String>,
}

struct LineUnit {
    methods: Vec<LineMethod>,
    calls: CallLog,
}

impl CompiledUnit for LineUnit {
    fn exports(&self) -> Vec<ExportedMethod> {
        self.methods.iter().map(|m| m.method.clone()).collect()
    }

    fn call(&self, method: &ExportedMethod, args: &[Value]) -> Result<Value, CallError> {
        self.calls
            .borrow_mut()
            .push((method.symbol.clone(), args.len()));
        let found = self
            .methods
            .iter()
            .find(|m| m.method == *method)
            .ok_or_else(|| CallError::Other(format!("no such method '{}'", method.symbol)))?;
        match &found.raises {
            Some(message) => Err(CallError::Invocation(
                ScriptFailure::new("Exception has been thrown by the target of an invocation.")
                    .with_cause(
                        ScriptFailure::new(message.clone())
                            .with_trace(format!("   at {}", method.symbol)),
                    ),
            )),
            None => Ok(Value::Null),
        }
    }
}

fn parse_sub(namespace: &str, declaration: &str) -> Option<LineMethod> {
    let (signature, raises) = match declaration.split_once(" raises ") {
        Some((signature, message)) => (signature, Some(message.trim().to_string())),
        None => (declaration, None),
    };
    let (path, arity) = signature.trim().split_once('/')?;
    let (module, name) = path.split_once('.')?;
    let arity = arity.parse().ok()?;
    Some(LineMethod {
        method: ExportedMethod {
            module: QualifiedName::in_namespace(namespace, module),
            name: name.to_string(),
            arity,
            symbol: format!("{path}/{arity}"),
        },
        raises,
    })
}

impl Language for LineLanguage {
    fn name(&self) -> &str {
        "Visual Basic"
    }

    fn is_valid_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn import_statement(&self, namespace: &str) -> String {
        format!("imports {namespace}\n")
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, BackendError> {
        let mut diagnostics = Diagnostics::new();
        for library in request.references {
            if !KNOWN_LIBRARIES.contains(&library.as_str()) {
                diagnostics.add_diagnostic(Diagnostic::error(format!(
                    "library '{library}' could not be found"
                )));
            }
        }

        let mut methods = Vec::new();
        for (index, line) in request.source.lines().enumerate() {
            let row = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let line = line.trim();
            if line.is_empty() || line.starts_with("imports ") {
                continue;
            }
            if line == "fatal" {
                return Err(BackendError::Unavailable(
                    "compiler resources are missing".into(),
                ));
            }
            if let Some(message) = line.strip_prefix("error ") {
                diagnostics.add_diagnostic(Diagnostic::error(message).at(Some("script"), row, 1));
            } else if let Some(message) = line.strip_prefix("warning ") {
                diagnostics.add_diagnostic(Diagnostic::warning(message).at(Some("script"), row, 1));
            } else if let Some(method) = line
                .strip_prefix("sub ")
                .and_then(|declaration| parse_sub(request.namespace, declaration))
            {
                methods.push(method);
            } else {
                diagnostics.add_diagnostic(
                    Diagnostic::error(format!("unexpected '{line}'")).at(Some("script"), row, 1),
                );
            }
        }

        if !diagnostics.is_empty() {
            return Ok(CompileOutput::failure(diagnostics));
        }
        Ok(CompileOutput::success(Box::new(LineUnit {
            methods,
            calls: Rc::clone(&self.calls),
        })))
    }
}

/// The default registry plus the line-based dialect.
pub fn registry_with(language: LineLanguage) -> LanguageRegistry {
    LanguageRegistry::default().with_language(LINE_ALIASES, Rc::new(language))
}

/// Installs a test subscriber so `RUST_LOG` shows host logging.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
