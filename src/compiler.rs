use scripthost_core::{BackendError, CompileRequest, Diagnostics, HostError};
use tracing::{info, warn};

use crate::environment::Environment;
use crate::invoker::CompiledScript;

/// Result of a compile the backend completed.
pub(crate) enum CompileOutcome {
    /// No diagnostics; the unit is ready to be invoked.
    Compiled(CompiledScript),
    /// At least one diagnostic; no unit was produced.
    Failed(Diagnostics),
}

/// Hands the environment to its backend and indexes the resulting unit.
///
/// Only a backend that could not run at all is an error. Every problem in the
/// script comes back as [`CompileOutcome::Failed`].
#[cfg_attr(feature = "profiling", profiling::function)]
pub(crate) fn compile(
    environment: &Environment,
    namespace: &str,
) -> Result<CompileOutcome, HostError> {
    let source = environment.source();
    let libraries = environment.libraries();
    let request = CompileRequest {
        source: source.text(),
        namespace,
        references: &libraries,
        flags: environment.flags(),
    };

    let output = environment.language().compile(&request)?;
    if !output.diagnostics.is_empty() {
        warn!(
            language = environment.language().name(),
            diagnostics = output.diagnostics.count(),
            errors = output.diagnostics.error_count(),
            "compile failed"
        );
        return Ok(CompileOutcome::Failed(output.diagnostics));
    }

    let unit = output.unit.ok_or_else(|| {
        BackendError::Unavailable("the backend reported success without a compiled unit".into())
    })?;
    let script = CompiledScript::new(unit, environment.fingerprint());
    info!(
        language = environment.language().name(),
        namespace,
        hash = %script.hash(),
        "compiled script"
    );
    Ok(CompileOutcome::Compiled(script))
}
