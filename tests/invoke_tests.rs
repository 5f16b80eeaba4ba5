//! Entry-point invocation against compiled scripts.

mod common;

use common::{LineLanguage, init_tracing, registry_with};
use scripthost::{CallError, HostError, ScriptHost};
use serde_json::json;

fn rhai_host(source: &str) -> ScriptHost {
    init_tracing();
    let mut host = ScriptHost::new("Rhai", "N").unwrap();
    host.set_source_code(source);
    assert!(host.compile().unwrap(), "{}", host.diagnostics());
    host
}

// ============================================================================
// Before compiling
// ============================================================================

#[test]
fn invoking_before_a_compile_is_not_running() {
    let mut host = ScriptHost::new("rhai", "N").unwrap();
    host.add_reference("Tools", "xml");
    host.add_import("Tools");
    host.set_source_code("fn M__Run() { }");

    assert!(matches!(host.invoke("M", "Run"), Err(HostError::NotRunning)));
    assert!(matches!(
        host.invoke_with_args("M", "Run", &[]),
        Err(HostError::NotRunning)
    ));
}

#[test]
fn failed_first_compile_stays_not_running() {
    let mut host = ScriptHost::new("rhai", "N").unwrap();
    host.set_source_code("fn M__Run( {");
    assert!(!host.compile().unwrap());

    let err = host.invoke("M", "Run").unwrap_err();
    assert_eq!(err.to_string(), "engine isn't running");
}

// ============================================================================
// Entry points without a value
// ============================================================================

#[test]
fn zero_argument_entry_point_runs() {
    let host = rhai_host("fn M__Run() { }");
    host.invoke("M", "Run").unwrap();
}

#[test]
fn string_list_entry_point_receives_an_empty_list() {
    let host = rhai_host(
        "fn M__Run(args) {\n\
         \x20   if type_of(args) != \"array\" || args.len() != 0 { throw \"unexpected arguments\"; }\n\
         }\n",
    );
    host.invoke("M", "Run").unwrap();
}

#[test]
fn string_list_signature_wins_over_no_arguments() {
    let host = rhai_host(
        "fn M__Run(args) { }\n\
         fn M__Run() { throw \"wrong overload\"; }\n",
    );
    host.invoke("M", "Run").unwrap();
}

#[test]
fn module_lookup_ignores_case() {
    let host = rhai_host("fn Checks__Run() { }");
    host.invoke("checks", "Run").unwrap();
    host.invoke("CHECKS", "Run").unwrap();
}

#[test]
fn missing_entry_point_names_module_and_method() {
    let host = rhai_host("fn M__Run() { }");

    let err = host.invoke("M", "run").unwrap_err();
    assert_eq!(
        err.to_string(),
        "entry point (method \"run\" in module \"M\") not found"
    );

    let err = host.invoke("Other", "Run").unwrap_err();
    assert!(err.is_entry_point_not_found());
}

#[test]
fn neither_signature_is_signature_not_found() {
    let host = rhai_host("fn M__Run(a, b) { }");
    match host.invoke("M", "Run").unwrap_err() {
        HostError::SignatureNotFound { module, method } => {
            assert_eq!(module, "M");
            assert_eq!(method, "Run");
        }
        other => panic!("unexpected {other}"),
    }
}

#[test]
fn script_failure_is_reported_with_its_message() {
    let host = rhai_host("fn M__Run() { throw \"invalid record\"; }");
    let err = host.invoke("M", "Run").unwrap_err();
    assert!(err.is_script_runtime());
    assert!(err.to_string().starts_with("invalid record"), "{err}");
}

#[test]
fn script_failure_carries_the_expanded_script_trace() {
    let host = rhai_host("fn M__Run(x) { throw \"bad\"; }");
    let err = host.invoke("M", "Run").unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad\n\nStack trace (of expanded script):\n   at M__Run line 3"
    );
}

#[test]
fn missing_function_in_the_body_is_not_retried() {
    let host = rhai_host(
        "fn M__Run(args) { nope(); }\n\
         fn M__Run() { throw \"retried without arguments\"; }\n",
    );
    let err = host.invoke("M", "Run").unwrap_err();
    assert!(err.is_script_runtime(), "{err}");
    let message = err.to_string();
    assert!(message.contains("nope"), "{message}");
    assert!(!message.contains("retried"), "{message}");
}

#[test]
fn helper_arity_mismatch_is_a_script_failure() {
    let host = rhai_host(
        "fn M__Run(args) { helper(1) }\n\
         fn helper(a, b) { a + b }\n",
    );
    let err = host.invoke("M", "Run").unwrap_err();
    assert!(!err.is_entry_point_not_found(), "{err}");
    assert!(err.is_script_runtime(), "{err}");
    assert!(err.to_string().contains("helper"), "{err}");
}

#[test]
fn failure_in_string_list_call_is_not_retried() {
    let language = LineLanguage::new();
    let calls = language.calls();
    let mut host = ScriptHost::with_registry(&registry_with(language), "VB", "N").unwrap();
    host.set_source_code("sub M.Run/1 raises record 7 is invalid\nsub M.Run/0\n");
    assert!(host.compile().unwrap());

    let err = host.invoke("M", "Run").unwrap_err();
    assert_eq!(
        err.to_string(),
        "record 7 is invalid\n\nStack trace (of expanded script):\n   at M.Run/1"
    );
    assert_eq!(*calls.borrow(), [("M.Run/1".to_string(), 1)]);
}

#[test]
fn fallback_retries_once_without_arguments() {
    let language = LineLanguage::new();
    let calls = language.calls();
    let mut host = ScriptHost::with_registry(&registry_with(language), "VB", "N").unwrap();
    host.set_source_code("sub M.Run/0 raises stopped\n");
    assert!(host.compile().unwrap());

    let err = host.invoke("M", "Run").unwrap_err();
    assert!(err.to_string().starts_with("stopped"));
    assert_eq!(*calls.borrow(), [("M.Run/0".to_string(), 0)]);
}

// ============================================================================
// Entry points with arguments and a value
// ============================================================================

#[test]
fn arguments_and_results_cross_the_boundary() {
    let host = rhai_host(
        "fn Math__Add(a, b) { a + b }\n\
         fn Math__Describe(record) { `${record.name} is ${record.age}` }\n\
         fn Math__Pair() { [1, \"two\"] }\n",
    );

    let sum = host.invoke_with_args("Math", "Add", &[json!(40), json!(2)]).unwrap();
    assert_eq!(sum, json!(42));

    let text = host
        .invoke_with_args("math", "Describe", &[json!({ "name": "Ada", "age": 36 })])
        .unwrap();
    assert_eq!(text, json!("Ada is 36"));

    let pair = host.invoke_with_args("Math", "Pair", &[]).unwrap();
    assert_eq!(pair, json!([1, "two"]));
}

#[test]
fn unknown_module_is_a_type_error() {
    let host = rhai_host("fn Math__Add(a, b) { a + b }");
    let err = host.invoke_with_args("Geometry", "Add", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "a compiler exception occurred: type 'N.Geometry' not found"
    );
}

#[test]
fn unknown_method_is_method_not_found() {
    let host = rhai_host("fn Math__Add(a, b) { a + b }");
    let err = host.invoke_with_args("Math", "add", &[]).unwrap_err();
    assert!(matches!(err, HostError::MethodNotFound { .. }));
    assert_eq!(err.to_string(), "method not found");
}

#[test]
fn wrong_argument_count_is_a_call_error() {
    let host = rhai_host("fn Math__Add(a, b) { a + b }");
    let err = host.invoke_with_args("Math", "Add", &[json!(1)]).unwrap_err();
    assert!(matches!(
        err,
        HostError::Call(CallError::ParameterCount { actual: 1 })
    ));
}

#[test]
fn value_form_failure_includes_the_raised_message() {
    let host = rhai_host("fn Math__Div(a, b) { if b == 0 { throw \"division by zero\"; } a / b }");
    let err = host
        .invoke_with_args("Math", "Div", &[json!(1), json!(0)])
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("script execution failure - exception: "), "{message}");
    assert!(message.contains("division by zero"), "{message}");
}

#[test]
fn value_form_failure_names_the_thrown_value() {
    let host = rhai_host("fn M__Run(x) { throw \"bad\"; }");
    let err = host.invoke_with_args("M", "Run", &[json!(1)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "script execution failure - exception: \"error in call to function 'M__Run'\" - inner exception: \"bad\""
    );
}

#[test]
fn value_form_missing_function_is_a_script_failure() {
    let host = rhai_host("fn M__Deep() { nope(); }");
    let err = host.invoke_with_args("M", "Deep", &[]).unwrap_err();
    assert!(err.is_script_runtime(), "{err}");
    assert!(
        err.to_string().starts_with(
            "script execution failure - exception: \"error in call to function 'M__Deep'\" - inner exception: \""
        ),
        "{err}"
    );
}

#[test]
fn value_form_failure_names_cause() {
    let mut host =
        ScriptHost::with_registry(&registry_with(LineLanguage::new()), "VB", "N").unwrap();
    host.set_source_code("sub M.Check/1 raises bad record\n");
    assert!(host.compile().unwrap());

    let err = host.invoke_with_args("M", "Check", &[json!("x")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "script execution failure - exception: \"Exception has been thrown by the target of an invocation.\" - inner exception: \"bad record\""
    );
}

// ============================================================================
// Libraries
// ============================================================================

#[test]
fn default_libraries_are_available() {
    let host = rhai_host(
        "fn Lib__Version() { System::version() }\n\
         fn Lib__Color() { Drawing::green(Drawing::rgb(1, 2, 3)) }\n\
         fn Lib__Markup() { Xml::escape(\"a < b\") }\n\
         fn Lib__Notify() { Forms::message_box(\"done\"); }\n",
    );

    let version = host.invoke_with_args("Lib", "Version", &[]).unwrap();
    assert!(version.as_str().is_some_and(|v| !v.is_empty()));
    assert_eq!(host.invoke_with_args("Lib", "Color", &[]).unwrap(), json!(2));
    assert_eq!(
        host.invoke_with_args("Lib", "Markup", &[]).unwrap(),
        json!("a &lt; b")
    );
    host.invoke("Lib", "Notify").unwrap();
}

#[test]
fn library_failures_surface_as_script_failures() {
    let host = rhai_host("fn Lib__Bad() { Drawing::rgb(300, 0, 0) }");
    let err = host.invoke_with_args("Lib", "Bad", &[]).unwrap_err();
    assert!(err.is_script_runtime());
    assert!(err.to_string().contains("red channel out of range"), "{err}");
}
