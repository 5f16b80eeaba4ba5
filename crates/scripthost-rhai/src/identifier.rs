/// Keywords and reserved words that can never be used as identifiers.
const RESERVED: &[&str] = &[
    // keywords
    "true", "false", "let", "const", "if", "else", "switch", "do", "while", "until", "loop",
    "for", "in", "continue", "break", "return", "throw", "try", "catch", "import", "export",
    "as", "global", "private", "fn", "this", "Fn", "call", "curry", "is_def_var", "is_def_fn",
    "is_shared", "print", "debug", "type_of", "eval",
    // reserved for future use
    "var", "static", "shared", "with", "is", "goto", "exit", "match", "case", "public",
    "protected", "new", "use", "module", "package", "super", "spawn", "thread", "go", "sync",
    "async", "await", "yield", "default", "void", "null", "nil",
];

/// Checks `name` against the rhai identifier rules.
///
/// An identifier is made of ASCII alphanumerics and `_`, has a letter before
/// its first digit, and is not a keyword or reserved word. `_1` and `__` are
/// therefore rejected while `_a1` is accepted.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut seen_letter = false;
    for c in name.chars() {
        match c {
            '_' => {}
            c if c.is_ascii_alphabetic() => seen_letter = true,
            c if c.is_ascii_digit() && seen_letter => {}
            _ => return false,
        }
    }
    seen_letter && !RESERVED.contains(&name)
}
