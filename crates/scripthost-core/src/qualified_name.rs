use std::fmt;

/// Namespace-qualified name of a module inside a compiled unit.
///
/// Entry points are looked up as `<namespace>.<module>`. Namespaces may
/// themselves be dotted (`Validation.Rules`), so the namespace is kept as a
/// list of segments.
///
/// # Examples
///
/// ```
/// use scripthost_core::QualifiedName;
///
/// let module = QualifiedName::new("Checks", vec!["Validation".into(), "Rules".into()]);
/// assert_eq!(module.to_string(), "Validation.Rules.Checks");
/// assert_eq!(module.lookup_key(), "validation.rules.checks");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g. "Checks")
    pub name: String,
    /// Namespace path (e.g. ["Validation", "Rules"]); empty for the global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create a name for `module` inside a dotted `namespace` string.
    ///
    /// An empty namespace string places the module in the global namespace.
    pub fn in_namespace(namespace: &str, module: impl Into<String>) -> Self {
        Self::new(module, split_segments(namespace))
    }

    /// Create from a dotted string (e.g. "Validation.Checks").
    ///
    /// The last segment is the name, the rest is the namespace. Empty segments
    /// are dropped, so "..Checks" equals "Checks".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut segments = split_segments(s);
        match segments.pop() {
            Some(name) => Self {
                name,
                namespace: segments,
            },
            None => Self::global(""),
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the namespace as a dotted string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join(".")
    }

    /// Case-insensitive key used to look the module up in an entry-point table.
    pub fn lookup_key(&self) -> String {
        self.to_string().to_lowercase()
    }
}

fn split_segments(s: &str) -> Vec<String> {
    s.split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
