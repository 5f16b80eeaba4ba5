/// The text handed to the compiler: an import header followed by the body.
///
/// Imports are prepended, so the header lists them in reverse order of
/// addition. Replacing the body leaves the header untouched.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptSource {
    text: String,
    header_len: usize,
}

impl ScriptSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts an import statement at the very front of the text.
    pub(crate) fn prepend_import(&mut self, statement: &str) {
        self.text.insert_str(0, statement);
        self.header_len += statement.len();
    }

    pub(crate) fn set_body(&mut self, body: &str) {
        self.text.truncate(self.header_len);
        self.text.push_str(body);
    }

    /// The full text, header included.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn header(&self) -> &str {
        &self.text[..self.header_len]
    }

    pub(crate) fn body(&self) -> &str {
        &self.text[self.header_len..]
    }
}
