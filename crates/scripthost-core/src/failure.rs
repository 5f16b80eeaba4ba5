use std::error::Error;
use std::fmt;

/// A failure raised while script code was running.
///
/// Backends report failures as a chain: the outermost failure usually comes
/// from the call mechanism itself ("error in call to function ..."), and its
/// immediate cause is the error the script actually raised. The trace is
/// free-form text describing where in the script the failure happened.
///
/// # Examples
///
/// ```
/// use scripthost_core::ScriptFailure;
///
/// let raised = ScriptFailure::new("value out of range").with_trace("   at Checks__Run line 4");
/// let failure = ScriptFailure::new("error in call to function 'Checks__Run'").with_cause(raised);
///
/// assert_eq!(failure.cause().map(|c| c.message()), Some("value out of range"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    message: String,
    trace: Option<String>,
    cause: Option<Box<ScriptFailure>>,
}

impl ScriptFailure {
    /// Creates a failure with a message and nothing else.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
            cause: None,
        }
    }

    /// Attaches a textual trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Attaches the immediate cause.
    pub fn with_cause(mut self, cause: ScriptFailure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The failure's own message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The textual trace, if the backend captured one.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// The immediate cause, if any.
    pub fn cause(&self) -> Option<&ScriptFailure> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ScriptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ScriptFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}
