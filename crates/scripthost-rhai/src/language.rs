use std::borrow::Cow;

use rhai::{Scope, module_resolvers::StaticModuleResolver};
use scripthost_core::{
    BackendError, CompileOutput, CompileRequest, CompilerFlags, Diagnostic, Diagnostics, Language,
};
use tracing::debug;

use crate::{
    config::RhaiConfig,
    engine::build_engine,
    error::{SCRIPT_SECTION, diagnostic_from_eval},
    identifier,
    libraries::LibraryCatalog,
    unit::RhaiUnit,
};

/// Identifiers under which the rhai dialect is normally registered.
pub const RHAI_ALIASES: &[&str] = &["Rhai", "rhai"];

/// Identifiers under which the `imports` flavour of rhai is normally registered.
pub const RHAI_BASIC_ALIASES: &[&str] = &["RhaiBasic", "Rhai Basic"];

/// How a dialect spells the import statements the host prepends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStyle {
    /// `import "System" as System;`, rhai's own syntax.
    #[default]
    Import,
    /// `imports System`, rewritten to rhai's syntax line by line before
    /// compiling so that row numbers are unchanged.
    Imports,
}

/// The rhai dialect and its compiler backend.
///
/// References name libraries in the backend's [`LibraryCatalog`]; every
/// namespace of a referenced library is registered with the engine and made
/// resolvable by `import` statements. Referencing an unknown library is a
/// compile diagnostic, so a host object registered as an event source needs
/// a catalog entry named after its crate that contributes its module path.
#[derive(Debug, Clone)]
pub struct RhaiLanguage {
    catalog: LibraryCatalog,
    config: RhaiConfig,
    style: ImportStyle,
}

impl RhaiLanguage {
    /// Creates the backend with the default libraries and configuration.
    pub fn new() -> Self {
        Self::with_catalog(LibraryCatalog::with_defaults(), RhaiConfig::default())
    }

    /// Creates the `imports` flavour with the default libraries and configuration.
    pub fn basic() -> Self {
        Self::new().with_import_style(ImportStyle::Imports)
    }

    pub fn with_catalog(catalog: LibraryCatalog, config: RhaiConfig) -> Self {
        Self {
            catalog,
            config,
            style: ImportStyle::default(),
        }
    }

    pub fn with_import_style(mut self, style: ImportStyle) -> Self {
        self.style = style;
        self
    }

    pub fn import_style(&self) -> ImportStyle {
        self.style
    }

    pub fn catalog(&self) -> &LibraryCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut LibraryCatalog {
        &mut self.catalog
    }

    pub fn config(&self) -> &RhaiConfig {
        &self.config
    }
}

impl Default for RhaiLanguage {
    fn default() -> Self {
        Self::new()
    }
}

fn check_flags(flags: CompilerFlags) -> Result<(), BackendError> {
    if flags.contains(CompilerFlags::GENERATE_EXECUTABLE) {
        return Err(BackendError::UnsupportedFlags(
            "rhai scripts cannot be compiled to an executable".into(),
        ));
    }
    if !flags.contains(CompilerFlags::GENERATE_IN_MEMORY) {
        return Err(BackendError::UnsupportedFlags(
            "rhai scripts can only be compiled in memory".into(),
        ));
    }
    Ok(())
}

/// `import "<namespace>" as <alias>;` with the last namespace segment as alias.
fn rhai_import(namespace: &str) -> String {
    let alias = namespace
        .rsplit(['.', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(namespace);
    format!("import \"{namespace}\" as {alias};")
}

/// Rewrites every `imports <namespace>` line into a rhai import.
fn expand_imports(source: &str) -> String {
    let mut expanded = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        let ending = &line[content.len()..];
        match content.trim().strip_prefix("imports ").map(str::trim) {
            Some(namespace) if !namespace.is_empty() && !namespace.contains(char::is_whitespace) => {
                expanded.push_str(&rhai_import(namespace));
            }
            _ => expanded.push_str(content),
        }
        expanded.push_str(ending);
    }
    expanded
}

impl Language for RhaiLanguage {
    fn name(&self) -> &str {
        match self.style {
            ImportStyle::Import => "Rhai",
            ImportStyle::Imports => "Rhai Basic",
        }
    }

    fn is_valid_identifier(&self, name: &str) -> bool {
        identifier::is_valid_identifier(name)
    }

    fn import_statement(&self, namespace: &str) -> String {
        match self.style {
            ImportStyle::Import => format!("{}\n", rhai_import(namespace)),
            ImportStyle::Imports => format!("imports {namespace}\n"),
        }
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, BackendError> {
        check_flags(request.flags)?;

        let mut engine = build_engine(&self.config, request.flags);
        let mut resolver = StaticModuleResolver::new();
        let mut diagnostics = Diagnostics::new();

        for reference in request.references {
            let Some(library) = self.catalog.get(reference) else {
                diagnostics.add_diagnostic(
                    Diagnostic::error(format!("library '{reference}' could not be found"))
                        .at(Some(SCRIPT_SECTION), 0, 0),
                );
                continue;
            };
            for (namespace, module) in library.namespaces() {
                debug!(library = reference.as_str(), namespace, "registering namespace");
                engine.register_static_module(namespace.replace('.', "::"), module.clone());
                resolver.insert(namespace, (**module).clone());
            }
        }
        engine.set_module_resolver(resolver);

        let source = match self.style {
            ImportStyle::Import => Cow::Borrowed(request.source),
            ImportStyle::Imports => Cow::Owned(expand_imports(request.source)),
        };
        match engine.compile_into_self_contained(&Scope::new(), &*source) {
            Ok(ast) if diagnostics.is_empty() => Ok(CompileOutput::success(Box::new(
                RhaiUnit::new(engine, ast, request.namespace, &self.config.module_separator),
            ))),
            Ok(_) => Ok(CompileOutput::failure(diagnostics)),
            Err(err) => {
                diagnostics.add_diagnostic(diagnostic_from_eval(&err));
                Ok(CompileOutput::failure(diagnostics))
            }
        }
    }
}
