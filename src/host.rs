use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use scripthost_core::{CompilerFlags, Diagnostic, Diagnostics, HostError, Value};
use scripthost_rhai::{DRAWING_LIBRARY, FORMS_LIBRARY, SYSTEM_LIBRARY, XML_LIBRARY};
use tracing::debug;

use crate::compiler::{self, CompileOutcome};
use crate::environment::{Environment, EventSource, Reference};
use crate::invoker::CompiledScript;
use crate::language::LanguageRegistry;
use crate::reporter::{DiagnosticReporter, SubscriptionId};

/// References every host starts with, as (name, library) pairs.
const DEFAULT_REFERENCES: [(&str, &str); 4] = [
    ("System", SYSTEM_LIBRARY),
    ("Forms", FORMS_LIBRARY),
    ("Drawing", DRAWING_LIBRARY),
    ("Xml", XML_LIBRARY),
];

/// Namespaces every host imports, in the order they are added.
const DEFAULT_IMPORTS: [&str; 2] = ["System", "Forms"];

/// Compiles one user script and invokes its entry points.
///
/// A host is created for one language and one namespace. It accumulates an
/// environment (references, imports, global instances, event sources) and the
/// script text, compiles them on request and keeps the most recent
/// successfully compiled unit for invocation.
///
/// A host is driven by a single caller in sequence: build the environment,
/// compile, invoke any number of times, then optionally change the
/// environment and compile again.
///
/// # Examples
///
/// ```
/// use scripthost::ScriptHost;
///
/// let mut host = ScriptHost::new("rhai", "Validation").unwrap();
/// host.set_source_code("fn Checks__Run() { }");
/// assert!(host.compile().unwrap());
/// host.invoke("Checks", "Run").unwrap();
/// ```
pub struct ScriptHost {
    language_id: String,
    namespace: String,
    environment: Environment,
    reporter: DiagnosticReporter,
    compiled: Option<CompiledScript>,
}

impl ScriptHost {
    /// Creates a host for one of the built-in languages.
    pub fn new(language: &str, namespace: &str) -> Result<Self, HostError> {
        Self::with_registry(&LanguageRegistry::default(), language, namespace)
    }

    /// Creates a host for a language of `registry`.
    ///
    /// The new host references the four default libraries and imports the
    /// `System` and `Forms` namespaces.
    pub fn with_registry(
        registry: &LanguageRegistry,
        language: &str,
        namespace: &str,
    ) -> Result<Self, HostError> {
        let backend = registry.resolve(language)?;
        let mut host = Self {
            language_id: language.to_string(),
            namespace: namespace.to_string(),
            environment: Environment::new(backend, CompilerFlags::default()),
            reporter: DiagnosticReporter::new(),
            compiled: None,
        };
        for (name, library) in DEFAULT_REFERENCES {
            host.environment.add_reference(name, library);
        }
        for namespace in DEFAULT_IMPORTS {
            host.environment.add_import(namespace);
        }
        debug!(language, namespace = host.namespace.as_str(), "created script host");
        Ok(host)
    }

    /// The language identifier the host was created with.
    pub fn language(&self) -> &str {
        &self.language_id
    }

    /// The namespace qualifying every module the script declares.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The complete text that will be compiled, import header included.
    pub fn source_code(&self) -> &str {
        self.environment.source().text()
    }

    /// The script text last set by the caller.
    pub fn body(&self) -> &str {
        self.environment.source().body()
    }

    /// Replaces the script text. Imports added so far are kept.
    pub fn set_source_code(&mut self, source: &str) {
        self.environment.set_body(source);
    }

    /// References `library` under `name`.
    ///
    /// Returns `false` if `name` is not a valid identifier. Whether the
    /// library exists is only checked when compiling.
    pub fn add_reference(&mut self, name: &str, library: &str) -> bool {
        self.environment.add_reference(name, library)
    }

    /// Prepends an import of `namespace` to the script text.
    pub fn add_import(&mut self, namespace: &str) {
        self.environment.add_import(namespace);
    }

    /// Binds a host object under `name`.
    ///
    /// Returns `false` if `name` is not a valid identifier; an existing
    /// binding with the same name is replaced.
    pub fn add_global_instance(&mut self, name: &str, instance: Rc<dyn Any>) -> bool {
        self.environment.add_global_instance(name, instance)
    }

    /// Removes the binding for `name`.
    ///
    /// Always returns `true`, whether or not `name` was bound.
    pub fn remove_global_instance(&mut self, name: &str) -> bool {
        self.environment.remove_global_instance(name)
    }

    /// Registers a host object as an event source.
    ///
    /// The library declaring `T` is referenced as `<name>Ref`, and the module
    /// declaring `T` is imported. Returns `false` if `name` is not a valid
    /// identifier.
    ///
    /// The library is the crate name and the import is the module path with
    /// `.` separators, both as reported by [`std::any::type_name`]. The
    /// backend must know that library, or the next compile reports it as
    /// missing. For the rhai dialects this means a catalog entry such as
    /// `Library::new("my_app").with_namespace("my_app.events", module)` for a
    /// type `my_app::events::Clicker`.
    pub fn add_event_source<T: Any>(&mut self, name: &str, instance: Rc<T>) -> bool {
        self.environment.add_event_source(name, instance)
    }

    pub fn references(&self) -> &[Reference] {
        self.environment.references()
    }

    /// Namespaces imported so far, in the order they were added.
    pub fn imports(&self) -> &[String] {
        self.environment.imports()
    }

    pub fn globals(&self) -> &FxHashMap<String, Rc<dyn Any>> {
        self.environment.globals()
    }

    pub fn event_sources(&self) -> &[EventSource] {
        self.environment.event_sources()
    }

    pub fn flags(&self) -> CompilerFlags {
        self.environment.flags()
    }

    /// Subscribes to failed compiles.
    ///
    /// The handler is called with the first diagnostic of every failed
    /// compile, before [`compile`](Self::compile) returns.
    pub fn on_compiler_error(
        &mut self,
        handler: impl FnMut(&Diagnostic) + 'static,
    ) -> SubscriptionId {
        self.reporter.subscribe(Box::new(handler))
    }

    /// Removes a handler added with [`on_compiler_error`](Self::on_compiler_error).
    pub fn remove_compiler_error_handler(&mut self, id: SubscriptionId) -> bool {
        self.reporter.unsubscribe(id)
    }

    /// Compiles the current script text with the current environment.
    ///
    /// Returns `Ok(true)` and replaces the running unit when the compile
    /// produced no diagnostics. Otherwise returns `Ok(false)`, notifies the
    /// compiler error handlers with the first diagnostic and keeps the
    /// previous unit, if any. `Err` means the backend could not run.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(&mut self) -> Result<bool, HostError> {
        match compiler::compile(&self.environment, &self.namespace)? {
            CompileOutcome::Compiled(script) => {
                self.compiled = Some(script);
                self.reporter.report(Diagnostics::new());
                Ok(true)
            }
            CompileOutcome::Failed(diagnostics) => {
                self.reporter.report(diagnostics);
                Ok(false)
            }
        }
    }

    /// Every diagnostic of the most recent compile.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.reporter.diagnostics()
    }

    /// Whether a compiled unit is available for invocation.
    pub fn is_running(&self) -> bool {
        self.compiled.is_some()
    }

    /// Whether the running unit was compiled from the current script text
    /// and the current references.
    pub fn is_current(&self) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|script| script.hash() == self.environment.fingerprint())
    }

    /// Qualified names of the modules in the running unit, sorted.
    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self
            .compiled
            .iter()
            .flat_map(|script| script.table().modules())
            .map(|entry| entry.name().to_string())
            .collect();
        modules.sort();
        modules
    }

    fn running(&self) -> Result<&CompiledScript, HostError> {
        self.compiled.as_ref().ok_or(HostError::NotRunning)
    }

    /// Calls `method` of `module` with `args` and returns its result.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke_with_args(
        &self,
        module: &str,
        method: &str,
        args: &[Value],
    ) -> Result<Value, HostError> {
        self.running()?
            .invoke_with_args(&self.namespace, module, method, args)
    }

    /// Calls the entry point `method` of `module`.
    ///
    /// The entry point may take either a list of strings, which is passed
    /// empty, or no arguments at all.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke(&self, module: &str, method: &str) -> Result<(), HostError> {
        self.running()?
            .invoke_entry_point(&self.namespace, module, method)
    }
}
