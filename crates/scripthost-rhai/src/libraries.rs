//! Libraries scripts can reference.
//!
//! A library is the unit a host references by identifier; it contributes one
//! or more namespaces, each a rhai module of native functions. Referencing a
//! library makes its namespaces available fully qualified (`System::version()`)
//! and resolvable by import statements.
//!
//! The default catalog carries four libraries:
//!
//! - **system** - `System`: host version, environment lookup, wall clock
//! - **forms** - `Forms`: user notifications, written to the host log
//! - **drawing** - `Drawing`: packed RGB colours
//! - **xml** - `Xml`: escaping text for XML documents

use std::time::{SystemTime, UNIX_EPOCH};

use rhai::{Dynamic, EvalAltResult, INT, ImmutableString, Module, Shared};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Identifier of the base runtime library.
pub const SYSTEM_LIBRARY: &str = "system";
/// Identifier of the user-notification library.
pub const FORMS_LIBRARY: &str = "forms";
/// Identifier of the colour library.
pub const DRAWING_LIBRARY: &str = "drawing";
/// Identifier of the XML library.
pub const XML_LIBRARY: &str = "xml";

type NativeResult<T> = Result<T, Box<EvalAltResult>>;

/// A referenceable collection of namespaces.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    namespaces: Vec<(String, Shared<Module>)>,
}

impl Library {
    /// Creates an empty library.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaces: Vec::new(),
        }
    }

    /// Adds a namespace backed by `module`.
    ///
    /// Namespace segments may be separated by `.` or `::`.
    pub fn with_namespace(mut self, namespace: impl Into<String>, module: Module) -> Self {
        self.namespaces.push((namespace.into(), module.into()));
        self
    }

    /// The identifier references use to name this library.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespaces this library contributes, in the order they were added.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &Shared<Module>)> {
        self.namespaces.iter().map(|(ns, module)| (ns.as_str(), module))
    }
}

/// Libraries known to a backend, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct LibraryCatalog {
    libraries: FxHashMap<String, Library>,
}

impl LibraryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the four default libraries.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for library in default_libraries() {
            catalog.insert(library);
        }
        catalog
    }

    /// Adds a library, replacing any library with the same identifier.
    pub fn insert(&mut self, library: Library) -> Option<Library> {
        self.libraries.insert(library.name.clone(), library)
    }

    /// Looks a library up by identifier.
    pub fn get(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    /// Whether a library with this identifier exists.
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.contains_key(name)
    }

    /// Number of libraries in the catalog.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// The libraries every default catalog starts with.
pub fn default_libraries() -> Vec<Library> {
    vec![
        Library::new(SYSTEM_LIBRARY).with_namespace("System", system_module()),
        Library::new(FORMS_LIBRARY).with_namespace("Forms", forms_module()),
        Library::new(DRAWING_LIBRARY).with_namespace("Drawing", drawing_module()),
        Library::new(XML_LIBRARY).with_namespace("Xml", xml_module()),
    ]
}

fn system_module() -> Module {
    let mut module = Module::new();
    module.set_native_fn("version", || -> NativeResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    });
    module.set_native_fn("env", |name: ImmutableString| -> NativeResult<Dynamic> {
        Ok(std::env::var(name.as_str()).map_or(Dynamic::UNIT, Dynamic::from))
    });
    module.set_native_fn("now_millis", || -> NativeResult<INT> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| e.to_string())?;
        Ok(INT::try_from(elapsed.as_millis()).unwrap_or(INT::MAX))
    });
    module
}

fn forms_module() -> Module {
    let mut module = Module::new();
    module.set_native_fn("message_box", |text: ImmutableString| -> NativeResult<()> {
        info!(target: "scripthost::forms", "{text}");
        Ok(())
    });
    module.set_native_fn("status", |text: ImmutableString| -> NativeResult<()> {
        debug!(target: "scripthost::forms", "{text}");
        Ok(())
    });
    module
}

fn drawing_module() -> Module {
    let mut module = Module::new();
    module.set_var("BLACK", 0 as INT);
    module.set_var("WHITE", 0xFF_FF_FF as INT);
    module.set_native_fn("rgb", |r: INT, g: INT, b: INT| -> NativeResult<INT> {
        for (channel, value) in [("red", r), ("green", g), ("blue", b)] {
            if !(0..=255).contains(&value) {
                return Err(format!("{channel} channel out of range: {value}").into());
            }
        }
        Ok((r << 16) | (g << 8) | b)
    });
    module.set_native_fn("red", |color: INT| -> NativeResult<INT> {
        Ok((color >> 16) & 0xFF)
    });
    module.set_native_fn("green", |color: INT| -> NativeResult<INT> {
        Ok((color >> 8) & 0xFF)
    });
    module.set_native_fn("blue", |color: INT| -> NativeResult<INT> { Ok(color & 0xFF) });
    module
}

fn xml_module() -> Module {
    let mut module = Module::new();
    module.set_native_fn("escape", |text: ImmutableString| -> NativeResult<String> {
        Ok(quick_xml::escape::escape(text.as_str()).into_owned())
    });
    module.set_native_fn("unescape", |text: ImmutableString| -> NativeResult<String> {
        quick_xml::escape::unescape(text.as_str())
            .map(|s| s.into_owned())
            .map_err(|e| format!("invalid XML text: {e}").into())
    });
    module
}
