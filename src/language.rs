//! Language backend selection.
//!
//! A [`LanguageRegistry`] maps language identifiers to the dialect that
//! compiles them. Several identifiers may name the same dialect.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use scripthost_core::{HostError, Language};
use scripthost_rhai::{RHAI_ALIASES, RHAI_BASIC_ALIASES, RhaiLanguage};

/// The set of language identifiers a host accepts.
///
/// [`LanguageRegistry::default`] knows the built-in rhai dialect under `Rhai`
/// and `rhai`, and its `imports` flavour under `RhaiBasic` and `Rhai Basic`.
/// Identifiers are case-sensitive.
///
/// # Examples
///
/// ```
/// use scripthost::LanguageRegistry;
///
/// let registry = LanguageRegistry::default();
/// assert!(registry.contains("Rhai"));
/// assert!(!registry.contains("RHAI"));
/// ```
#[derive(Clone)]
pub struct LanguageRegistry {
    languages: FxHashMap<String, Rc<dyn Language>>,
}

impl LanguageRegistry {
    /// Creates a registry that accepts no identifiers.
    pub fn empty() -> Self {
        Self {
            languages: FxHashMap::default(),
        }
    }

    /// Registers `language` under every identifier in `aliases`.
    ///
    /// An identifier that is already registered is rebound to `language`.
    pub fn register(&mut self, aliases: &[&str], language: Rc<dyn Language>) {
        for alias in aliases {
            self.languages.insert((*alias).to_string(), Rc::clone(&language));
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_language(mut self, aliases: &[&str], language: Rc<dyn Language>) -> Self {
        self.register(aliases, language);
        self
    }

    /// Looks up the dialect for a language identifier.
    pub fn resolve(&self, language: &str) -> Result<Rc<dyn Language>, HostError> {
        self.languages
            .get(language)
            .cloned()
            .ok_or_else(|| HostError::UnknownLanguage {
                language: language.to_string(),
            })
    }

    /// Whether `language` is a recognized identifier.
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// All recognized identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::empty()
            .with_language(RHAI_ALIASES, Rc::new(RhaiLanguage::new()))
            .with_language(RHAI_BASIC_ALIASES, Rc::new(RhaiLanguage::basic()))
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_knows_both_rhai_spellings() {
        let registry = LanguageRegistry::default();
        assert_eq!(
            registry.identifiers(),
            ["Rhai", "Rhai Basic", "RhaiBasic", "rhai"]
        );

        let upper = registry.resolve("Rhai").unwrap();
        let lower = registry.resolve("rhai").unwrap();
        assert!(Rc::ptr_eq(&upper, &lower));
        assert_eq!(upper.name(), "Rhai");
    }

    #[test]
    fn default_carries_both_import_keywords() {
        let registry = LanguageRegistry::default();
        let import = registry.resolve("Rhai").unwrap();
        let imports = registry.resolve("Rhai Basic").unwrap();
        assert!(Rc::ptr_eq(&imports, &registry.resolve("RhaiBasic").unwrap()));
        assert_eq!(import.import_statement("Forms"), "import \"Forms\" as Forms;\n");
        assert_eq!(imports.import_statement("Forms"), "imports Forms\n");
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = LanguageRegistry::default().resolve("RHAI").err().unwrap();
        assert_eq!(err.to_string(), "unknown script language 'RHAI'");
    }

    #[test]
    fn empty_registry_accepts_nothing() {
        let registry = LanguageRegistry::empty();
        assert!(registry.identifiers().is_empty());
        assert!(registry.resolve("rhai").is_err());
    }
}
