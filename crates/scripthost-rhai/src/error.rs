//! Translation of rhai errors into host diagnostics and script failures.

use rhai::{EvalAltResult, Position};
use scripthost_core::{CallError, Diagnostic, ScriptFailure};

/// Section name reported for diagnostics in the compiled script text.
pub(crate) const SCRIPT_SECTION: &str = "script";

/// Turns a compile-time error into a diagnostic located in the script text.
pub(crate) fn diagnostic_from_eval(err: &EvalAltResult) -> Diagnostic {
    let (row, col) = location(err.position());
    Diagnostic::error(describe(err)).at(Some(SCRIPT_SECTION), row, col)
}

/// Turns an error raised while running `symbol` into a [`CallError`].
///
/// Every runtime error becomes an invocation failure of `symbol` whose cause
/// is the innermost error, traced from the innermost frame out to `symbol`.
/// rhai may or may not wrap an error raised directly in `symbol`, so the
/// outermost frame is added when the wrapping is missing.
pub(crate) fn call_error_from_eval(err: &EvalAltResult, symbol: &str) -> CallError {
    let mut frames = nested_frames(err);
    let wrapped = matches!(err, EvalAltResult::ErrorInFunctionCall(name, ..) if name == symbol);
    if !wrapped {
        frames.push(frame(symbol, err.position()));
    }
    let raised = ScriptFailure::new(describe(innermost(err))).with_trace(frames.join("\n"));
    CallError::Invocation(
        ScriptFailure::new(format!("error in call to function '{symbol}'")).with_cause(raised),
    )
}

fn describe(err: &EvalAltResult) -> String {
    match err {
        EvalAltResult::ErrorRuntime(value, _) => value.to_string(),
        EvalAltResult::ErrorParsing(kind, _) => kind.to_string(),
        other => other.to_string(),
    }
}

fn innermost(err: &EvalAltResult) -> &EvalAltResult {
    let mut current = err;
    while let EvalAltResult::ErrorInFunctionCall(_, _, inner, _) = current {
        current = inner;
    }
    current
}

/// One frame per nested function call, innermost first.
fn nested_frames(err: &EvalAltResult) -> Vec<String> {
    let mut frames = Vec::new();
    let mut current = err;
    while let EvalAltResult::ErrorInFunctionCall(name, _, inner, _) = current {
        frames.push(frame(name, inner.position()));
        current = inner;
    }
    frames.reverse();
    frames
}

fn frame(name: &str, pos: Position) -> String {
    match pos.line() {
        Some(line) => format!("   at {name} line {line}"),
        None => format!("   at {name}"),
    }
}

fn location(pos: Position) -> (u32, u32) {
    let row = pos.line().unwrap_or(0);
    let col = pos.position().unwrap_or(0);
    (
        u32::try_from(row).unwrap_or(u32::MAX),
        u32::try_from(col).unwrap_or(u32::MAX),
    )
}
