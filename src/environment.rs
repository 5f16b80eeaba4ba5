//! Compiler inputs accumulated before a compile.
//!
//! Every operation that takes a name checks it against the target dialect's
//! identifier rules first. A rejected name is reported by returning `false`
//! and leaves the environment unchanged.

use std::any::{Any, type_name};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use scripthost_core::{CompilerFlags, Language, SourceHash};
use tracing::debug;

use crate::source::ScriptSource;

/// Suffix appended to an event source name to form its reference name.
const EVENT_SOURCE_REFERENCE_SUFFIX: &str = "Ref";

/// Library recorded for types declared outside any crate path.
const BUILTIN_LIBRARY: &str = "std";

/// A named library reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Name the reference was registered under.
    pub name: String,
    /// Identifier of the referenced library.
    pub library: String,
}

/// A host object registered as a source of events.
#[derive(Clone)]
pub struct EventSource {
    /// Name the object was registered under.
    pub name: String,
    /// Concrete type of the object, without generic arguments.
    pub type_name: String,
    /// Library (crate) declaring the type.
    pub library: String,
    /// Namespace (module path) declaring the type, if any.
    pub namespace: Option<String>,
    instance: Rc<dyn Any>,
}

impl EventSource {
    /// The registered object.
    pub fn instance(&self) -> &Rc<dyn Any> {
        &self.instance
    }
}

impl fmt::Debug for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("library", &self.library)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Splits a Rust type path into (type name, library, namespace).
///
/// `my_app::events::Clicker<u32>` gives `Clicker`, `my_app` and
/// `my_app.events`; a bare `u32` gives `u32`, [`BUILTIN_LIBRARY`] and no
/// namespace.
fn describe_type(path: &str) -> (String, String, Option<String>) {
    let path = path.split('<').next().unwrap_or(path);
    let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => (path.to_string(), BUILTIN_LIBRARY.to_string(), None),
        [name] => (name.to_string(), BUILTIN_LIBRARY.to_string(), None),
        [library, .., name] => (
            name.to_string(),
            library.to_string(),
            Some(segments[..segments.len() - 1].join(".")),
        ),
    }
}

pub(crate) struct Environment {
    language: Rc<dyn Language>,
    source: ScriptSource,
    references: Vec<Reference>,
    imports: Vec<String>,
    globals: FxHashMap<String, Rc<dyn Any>>,
    event_sources: Vec<EventSource>,
    flags: CompilerFlags,
}

impl Environment {
    pub(crate) fn new(language: Rc<dyn Language>, flags: CompilerFlags) -> Self {
        Self {
            language,
            source: ScriptSource::new(),
            references: Vec::new(),
            imports: Vec::new(),
            globals: FxHashMap::default(),
            event_sources: Vec::new(),
            flags,
        }
    }

    fn accepts(&self, operation: &str, name: &str) -> bool {
        let valid = self.language.is_valid_identifier(name);
        if !valid {
            debug!(operation, name, language = self.language.name(), "rejected identifier");
        }
        valid
    }

    pub(crate) fn language(&self) -> &dyn Language {
        self.language.as_ref()
    }

    pub(crate) fn source(&self) -> &ScriptSource {
        &self.source
    }

    pub(crate) fn set_body(&mut self, body: &str) {
        self.source.set_body(body);
    }

    pub(crate) fn add_reference(&mut self, name: &str, library: &str) -> bool {
        if !self.accepts("add_reference", name) {
            return false;
        }
        debug!(name, library, "adding reference");
        self.references.push(Reference {
            name: name.to_string(),
            library: library.to_string(),
        });
        true
    }

    pub(crate) fn add_import(&mut self, namespace: &str) {
        debug!(namespace, "adding import");
        let statement = self.language.import_statement(namespace);
        self.source.prepend_import(&statement);
        self.imports.push(namespace.to_string());
    }

    pub(crate) fn add_global_instance(&mut self, name: &str, instance: Rc<dyn Any>) -> bool {
        if !self.accepts("add_global_instance", name) {
            return false;
        }
        debug!(name, "binding global instance");
        self.globals.insert(name.to_string(), instance);
        true
    }

    pub(crate) fn remove_global_instance(&mut self, name: &str) -> bool {
        let removed = self.globals.remove(name).is_some();
        debug!(name, removed, "removing global instance");
        true
    }

    pub(crate) fn add_event_source<T: Any>(&mut self, name: &str, instance: Rc<T>) -> bool {
        if !self.accepts("add_event_source", name) {
            return false;
        }
        let (type_name, library, namespace) = describe_type(type_name::<T>());
        debug!(name, type_name = %type_name, library = %library, "adding event source");

        let reference = format!("{name}{EVENT_SOURCE_REFERENCE_SUFFIX}");
        self.references.push(Reference {
            name: reference,
            library: library.clone(),
        });
        if let Some(namespace) = &namespace {
            self.add_import(namespace);
        }
        self.event_sources.push(EventSource {
            name: name.to_string(),
            type_name,
            library,
            namespace,
            instance,
        });
        true
    }

    pub(crate) fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Library identifiers of every reference, in insertion order.
    pub(crate) fn libraries(&self) -> Vec<String> {
        self.references.iter().map(|r| r.library.clone()).collect()
    }

    pub(crate) fn imports(&self) -> &[String] {
        &self.imports
    }

    pub(crate) fn globals(&self) -> &FxHashMap<String, Rc<dyn Any>> {
        &self.globals
    }

    pub(crate) fn event_sources(&self) -> &[EventSource] {
        &self.event_sources
    }

    pub(crate) fn flags(&self) -> CompilerFlags {
        self.flags
    }

    /// Fingerprint of what a compile reads: the text and the referenced libraries.
    pub(crate) fn fingerprint(&self) -> SourceHash {
        SourceHash::of_parts(
            std::iter::once(self.source.text())
                .chain(self.references.iter().map(|r| r.library.as_str())),
        )
    }
}
