use serde::Deserialize;

/// Engine limits and dialect settings for the rhai backend.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```
/// use scripthost_rhai::RhaiConfig;
///
/// let config = RhaiConfig::from_json(r#"{ "max_call_levels": 16 }"#).unwrap();
/// assert_eq!(config.max_call_levels, 16);
/// assert_eq!(config.module_separator, "__");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RhaiConfig {
    /// Maximum number of operations per call; `0` means unlimited.
    pub max_operations: u64,
    /// Maximum call stack depth.
    pub max_call_levels: usize,
    /// Maximum expression nesting depth.
    pub max_expr_depth: usize,
    /// Maximum nesting depth inside function bodies.
    pub max_function_expr_depth: usize,
    /// Maximum size of any string value; `0` means unlimited.
    pub max_string_size: usize,
    /// Maximum size of any array; `0` means unlimited.
    pub max_array_size: usize,
    /// Maximum size of any object map; `0` means unlimited.
    pub max_map_size: usize,
    /// Maximum number of variables in scope.
    pub max_variables: usize,
    /// Maximum number of script functions.
    pub max_functions: usize,
    /// Maximum number of modules a script may import.
    pub max_modules: usize,
    /// Reject scripts that use undeclared variables at compile time.
    pub strict_variables: bool,
    /// Separates the module name from the method name in exported functions.
    pub module_separator: String,
}

impl Default for RhaiConfig {
    fn default() -> Self {
        Self {
            max_operations: 0,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 1_000_000,
            max_array_size: 100_000,
            max_map_size: 100_000,
            max_variables: 10_000,
            max_functions: 1_000,
            max_modules: 64,
            strict_variables: false,
            module_separator: "__".to_string(),
        }
    }
}

impl RhaiConfig {
    /// Reads a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RhaiConfig::from_json("{}").unwrap(), RhaiConfig::default());
    }

    #[test]
    fn unlimited_operations_by_default() {
        assert_eq!(RhaiConfig::default().max_operations, 0);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(RhaiConfig::from_json(r#"{ "strict_variables": "yes" }"#).is_err());
    }
}
