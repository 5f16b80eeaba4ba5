use rhai::{AST, CallFnOptions, Dynamic, Engine, FnAccess, Scope};
use scripthost_core::{CallError, CompiledUnit, ExportedMethod, QualifiedName, Value};
use tracing::trace;

use crate::error::call_error_from_eval;

/// Module receiving functions whose names carry no module prefix.
pub const DEFAULT_MODULE: &str = "Script";

/// A compiled rhai script together with the engine that compiled it.
///
/// Script functions named `<Module><separator><Method>` are exported as
/// `Method` of module `<namespace>.<Module>`; any other function is exported
/// from [`DEFAULT_MODULE`]. Private functions and closures are not exported.
pub struct RhaiUnit {
    engine: Engine,
    ast: AST,
    namespace: String,
    separator: String,
}

impl RhaiUnit {
    pub(crate) fn new(engine: Engine, ast: AST, namespace: &str, separator: &str) -> Self {
        Self {
            engine,
            ast,
            namespace: namespace.to_string(),
            separator: separator.to_string(),
        }
    }

    fn split_name<'a>(&self, name: &'a str) -> (&'a str, &'a str) {
        if !self.separator.is_empty() {
            if let Some((module, method)) = name.split_once(self.separator.as_str()) {
                if !module.is_empty() && !method.is_empty() {
                    return (module, method);
                }
            }
        }
        (DEFAULT_MODULE, name)
    }

    /// Whether the script defines `symbol` taking `arity` parameters.
    ///
    /// Checked before calling, so that a missing function reported by rhai
    /// always comes from inside the script.
    fn defines(&self, symbol: &str, arity: usize) -> bool {
        self.ast
            .iter_functions()
            .any(|f| f.name == symbol && f.params.len() == arity)
    }
}

impl CompiledUnit for RhaiUnit {
    fn exports(&self) -> Vec<ExportedMethod> {
        self.ast
            .iter_functions()
            .filter(|f| !matches!(f.access, FnAccess::Private))
            .filter(|f| !f.name.contains('$'))
            .map(|f| {
                let (module, method) = self.split_name(f.name);
                ExportedMethod {
                    module: QualifiedName::in_namespace(&self.namespace, module),
                    name: method.to_string(),
                    arity: f.params.len(),
                    symbol: f.name.to_string(),
                }
            })
            .collect()
    }

    fn call(&self, method: &ExportedMethod, args: &[Value]) -> Result<Value, CallError> {
        let args = args
            .iter()
            .map(rhai::serde::to_dynamic)
            .collect::<Result<Vec<Dynamic>, _>>()
            .map_err(|e| CallError::Other(format!("argument conversion failed: {e}")))?;
        let actual = args.len();
        if !self.defines(&method.symbol, actual) {
            return Err(CallError::ParameterCount { actual });
        }

        trace!(symbol = %method.symbol, actual, "calling script function");

        let options = CallFnOptions::new().eval_ast(false).rewind_scope(true);
        let result = self
            .engine
            .call_fn_with_options::<Dynamic>(options, &mut Scope::new(), &self.ast, &method.symbol, args)
            .map_err(|e| call_error_from_eval(&e, &method.symbol))?;

        rhai::serde::from_dynamic::<Value>(&result)
            .map_err(|e| CallError::Other(format!("return value conversion failed: {e}")))
    }
}
