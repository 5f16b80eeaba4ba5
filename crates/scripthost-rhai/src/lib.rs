//! Rhai compiler backend for the script host.
//!
//! [`RhaiLanguage`] implements the host's [`Language`](scripthost_core::Language)
//! trait on top of the [rhai](https://rhai.rs) engine. Script functions named
//! `Module__Method` become entry point `Method` of module `<namespace>.Module`.
//! [`RhaiLanguage::basic`] is the same backend spelling its imports
//! `imports System` instead of `import "System" as System;`.
//!
//! ```
//! use scripthost_core::{CompileRequest, CompilerFlags, Language};
//! use scripthost_rhai::RhaiLanguage;
//!
//! let references = vec!["system".to_string()];
//! let output = RhaiLanguage::new()
//!     .compile(&CompileRequest {
//!         source: "fn Checks__Run() { System::version() }",
//!         namespace: "Validation",
//!         references: &references,
//!         flags: CompilerFlags::default(),
//!     })
//!     .unwrap();
//! assert!(output.diagnostics.is_empty());
//! ```

mod config;
mod engine;
mod error;
mod identifier;
mod language;
mod libraries;
mod unit;

pub use config::RhaiConfig;
pub use identifier::is_valid_identifier;
pub use language::{ImportStyle, RHAI_ALIASES, RHAI_BASIC_ALIASES, RhaiLanguage};
pub use libraries::{
    DRAWING_LIBRARY, FORMS_LIBRARY, Library, LibraryCatalog, SYSTEM_LIBRARY, XML_LIBRARY,
    default_libraries,
};
pub use rhai::Module;
pub use unit::{DEFAULT_MODULE, RhaiUnit};
