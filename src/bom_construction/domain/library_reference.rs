use std::fmt;

/// Caller-supplied token naming a library: a bare name (`png`), a
/// linker-style name, or a literal file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryReference(String);

impl LibraryReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into().trim().to_string())
    }

    /// Accepts `-lpng` style tokens as well as bare names.
    pub fn from_linker_flag(flag: &str) -> Self {
        let trimmed = flag.trim();
        Self::new(trimmed.strip_prefix("-l").unwrap_or(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LibraryReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LibraryReference {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
