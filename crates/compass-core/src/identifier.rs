//! Interned variable names.
//!
//! [`Id`] is a `Copy` handle into a process-wide string interner, so variable
//! lookups in an expression context compare symbols instead of strings.

use std::{
    convert::Infallible,
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// An interned identifier.
///
/// # Examples
///
/// ```
/// use compass_core::identifier::Id;
///
/// let a = Id::new("A");
/// assert_eq!(a, Id::new("A"));
/// assert_eq!(a, "A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(DefaultSymbol);

impl Id {
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(name)
    }
}

impl FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().get(other) == Some(self.0)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("circle_a"), Id::new("circle_a"));
        assert_ne!(Id::new("circle_a"), Id::new("circle_b"));
    }

    #[test]
    fn test_display_round_trips() {
        let id: Id = "L1".parse().unwrap();
        assert_eq!(id.to_string(), "L1");
        assert!(id == "L1");
        assert!(id != "L2");
    }
}
