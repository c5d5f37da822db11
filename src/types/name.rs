//! Validated GraphQL names.

use std::fmt;

use ref_cast::RefCast;

/// GraphQL name, checked against `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
#[derive(Debug, Eq, Hash, PartialEq, RefCast)]
#[repr(transparent)]
pub struct Name(str);

impl Name {
    /// Checks whether `input` is a valid GraphQL name.
    pub fn is_valid(input: &str) -> bool {
        let mut chars = input.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first == '_' || first.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
    }

    /// Views `input` as a [`Name`], if it is a valid one.
    pub fn new(input: &str) -> Option<&Self> {
        Self::is_valid(input).then(|| Self::ref_cast(input))
    }

    /// Underlying string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
