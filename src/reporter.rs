use scripthost_core::{Diagnostic, Diagnostics};

/// Callback fired with the first diagnostic of a failed compile.
pub type CompilerErrorHandler = Box<dyn FnMut(&Diagnostic)>;

/// Handle returned when subscribing to compiler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Notification channel for failed compiles.
///
/// Handlers run synchronously, in subscription order, on the thread that
/// called `compile`. Each failed compile notifies once with its first
/// diagnostic; the full list stays available through [`diagnostics`](Self::diagnostics).
#[derive(Default)]
pub(crate) struct DiagnosticReporter {
    handlers: Vec<(SubscriptionId, CompilerErrorHandler)>,
    next_id: u64,
    last: Diagnostics,
}

impl DiagnosticReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&mut self, handler: CompilerErrorHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Records the diagnostics of a compile and notifies with the first one.
    pub(crate) fn report(&mut self, diagnostics: Diagnostics) {
        self.last = diagnostics;
        if let Some(first) = self.last.first() {
            for (_, handler) in &mut self.handlers {
                handler(first);
            }
        }
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.last
    }
}
