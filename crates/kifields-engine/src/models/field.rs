use crate::parsing::escape_name;

/// One `(field ...)` entry from the `field_names` notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name in unescaped form (no surrounding quotes, no backslash
    /// escapes).
    pub name: String,
    /// Raw text between the closing quote of the name and this entry's
    /// closing paren, e.g. `" visible"`, `" url"`, `" visible url"`.
    /// Kept verbatim so flag tokens this crate does not know about
    /// survive a round trip.
    pub flags: String,
}

impl Field {
    /// Create a field with no flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: String::new(),
        }
    }

    /// Create a field carrying raw flag text.
    pub fn with_flags(name: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: flags.into(),
        }
    }

    /// Flag text trimmed of surrounding whitespace, for display.
    pub fn trimmed_flags(&self) -> &str {
        self.flags.trim()
    }

    /// Rebuild this entry's `(field ...)` S-expression, keeping the flags
    /// inside the pair. Exactly one space separates the name part from the
    /// flags when there are any; none trails when there are none.
    pub fn to_sexpr(&self) -> String {
        let flags = self.flags.trim();
        if flags.is_empty() {
            format!("(field (name \"{}\"))", escape_name(&self.name))
        } else {
            format!("(field (name \"{}\") {})", escape_name(&self.name), flags)
        }
    }
}
