//! Entry-point lookup and invocation.
//!
//! After every successful compile the exports of the compiled unit are
//! indexed once into an [`EntryPointTable`]. Module lookups are
//! case-insensitive, method lookups are not.

use rustc_hash::FxHashMap;
use scripthost_core::{
    CallError, CompiledUnit, ExportedMethod, HostError, QualifiedName, ScriptFailure, SourceHash,
    Value,
};
use tracing::debug;

/// Header placed between a failure message and its trace.
const STACK_TRACE_HEADER: &str = "Stack trace (of expanded script):";

/// The methods of one module, with every overload of each name.
#[derive(Debug, Clone)]
pub(crate) struct ModuleEntry {
    name: QualifiedName,
    methods: FxHashMap<String, Vec<ExportedMethod>>,
}

impl ModuleEntry {
    pub(crate) fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub(crate) fn overloads(&self, method: &str) -> Option<&[ExportedMethod]> {
        self.methods.get(method).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EntryPointTable {
    modules: FxHashMap<String, ModuleEntry>,
}

impl EntryPointTable {
    pub(crate) fn from_exports(exports: Vec<ExportedMethod>) -> Self {
        let mut modules: FxHashMap<String, ModuleEntry> = FxHashMap::default();
        for method in exports {
            let entry = modules
                .entry(method.module.lookup_key())
                .or_insert_with(|| ModuleEntry {
                    name: method.module.clone(),
                    methods: FxHashMap::default(),
                });
            entry
                .methods
                .entry(method.name.clone())
                .or_default()
                .push(method);
        }
        debug!(modules = modules.len(), "built entry point table");
        Self { modules }
    }

    pub(crate) fn module(&self, name: &QualifiedName) -> Option<&ModuleEntry> {
        self.modules.get(&name.lookup_key())
    }

    pub(crate) fn modules(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.values()
    }
}

/// A successfully compiled unit and what the host knows about it.
pub(crate) struct CompiledScript {
    unit: Box<dyn CompiledUnit>,
    table: EntryPointTable,
    hash: SourceHash,
}

impl CompiledScript {
    pub(crate) fn new(unit: Box<dyn CompiledUnit>, hash: SourceHash) -> Self {
        let table = EntryPointTable::from_exports(unit.exports());
        Self { unit, table, hash }
    }

    pub(crate) fn table(&self) -> &EntryPointTable {
        &self.table
    }

    pub(crate) fn hash(&self) -> SourceHash {
        self.hash
    }

    /// Calls the overload of `overloads` taking `args.len()` arguments.
    fn call(&self, overloads: &[ExportedMethod], args: &[Value]) -> Result<Value, CallError> {
        let method = overloads
            .iter()
            .find(|m| m.arity == args.len())
            .ok_or(CallError::ParameterCount { actual: args.len() })?;
        self.unit.call(method, args)
    }

    /// Calls `namespace.module.method` with `args` and returns its result.
    ///
    /// A failure raised by the script is reported with both its own message
    /// and the message of its immediate cause.
    pub(crate) fn invoke_with_args(
        &self,
        namespace: &str,
        module: &str,
        method: &str,
        args: &[Value],
    ) -> Result<Value, HostError> {
        let qualified = QualifiedName::in_namespace(namespace, module);
        let entry = self
            .table
            .module(&qualified)
            .ok_or_else(|| HostError::TypeNotFound {
                type_name: qualified.to_string(),
            })?;
        let overloads = entry
            .overloads(method)
            .ok_or_else(|| HostError::MethodNotFound {
                method: method.to_string(),
            })?;

        self.call(overloads, args).map_err(|err| match err {
            CallError::Invocation(failure) => invocation_failure(failure),
            other => HostError::Call(other),
        })
    }

    /// Calls an entry point that returns nothing.
    ///
    /// The entry point is first called with an empty string list; when it
    /// takes no parameter, it is called again without arguments.
    pub(crate) fn invoke_entry_point(
        &self,
        namespace: &str,
        module: &str,
        method: &str,
    ) -> Result<(), HostError> {
        let not_found = || HostError::EntryPointNotFound {
            module: module.to_string(),
            method: method.to_string(),
        };
        let qualified = QualifiedName::in_namespace(namespace, module);
        let overloads = self
            .table
            .module(&qualified)
            .ok_or_else(not_found)?
            .overloads(method)
            .ok_or_else(not_found)?;

        let first = self.call(overloads, &[Value::Array(Vec::new())]);
        let result = match first {
            Err(CallError::ParameterCount { .. }) => {
                debug!(module, method, "retrying entry point without arguments");
                self.call(overloads, &[])
            }
            other => other,
        };

        match result {
            Ok(_) => Ok(()),
            Err(CallError::ParameterCount { .. }) => Err(HostError::SignatureNotFound {
                module: module.to_string(),
                method: method.to_string(),
            }),
            Err(CallError::Invocation(failure)) => Err(entry_point_failure(failure)),
            Err(other) => Err(HostError::Call(other)),
        }
    }
}

/// Combines a failure with its immediate cause into one message.
///
/// A failure without a cause is reported by its own message alone.
fn invocation_failure(failure: ScriptFailure) -> HostError {
    let message = match failure.cause() {
        Some(cause) => format!(
            "script execution failure - exception: \"{}\" - inner exception: \"{}\"",
            failure.message(),
            cause.message()
        ),
        None => format!(
            "script execution failure - exception: \"{}\"",
            failure.message()
        ),
    };
    HostError::ScriptRuntime {
        message,
        source: Some(failure),
    }
}

/// Unwraps one level of the call mechanism and keeps the raised failure's trace.
fn entry_point_failure(failure: ScriptFailure) -> HostError {
    let raised = match failure.cause() {
        Some(cause) => cause.clone(),
        None => failure,
    };
    let message = match raised.trace() {
        Some(trace) => format!("{}\n\n{STACK_TRACE_HEADER}\n{trace}", raised.message()),
        None => raised.message().to_string(),
    };
    HostError::ScriptRuntime {
        message,
        source: Some(raised),
    }
}
