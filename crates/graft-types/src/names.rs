//! Structural names for types.
//!
//! Method lookup and overload disambiguation compare these values
//! structurally; no live type system is ever consulted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A namespace-qualified type name, displayed as `namespace.Name` (or a bare
/// `Name` when the namespace is empty).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// A name in the global (empty) namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self::new("", name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = TypeError;

    /// Parse `namespace.Name`. The final dot separates the namespace from
    /// the type name; everything before it is the namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypeError::InvalidQualifiedName {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(invalid("name must not contain whitespace"));
        }
        if s.starts_with('.') || s.ends_with('.') {
            return Err(invalid("name must not start or end with '.'"));
        }
        if s.contains("..") {
            return Err(invalid("name must not contain empty components"));
        }

        match s.rsplit_once('.') {
            Some((namespace, name)) => Ok(Self::new(namespace, name)),
            None => Ok(Self::global(s)),
        }
    }
}

/// A structural type reference: qualified name plus generic arity.
///
/// Displayed as `` namespace.Name`N `` for non-zero arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: QualifiedName,
    pub generic_arity: u16,
}

impl TypeRef {
    /// A non-generic type reference.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            generic_arity: 0,
        }
    }

    pub fn with_arity(name: QualifiedName, generic_arity: u16) -> Self {
        Self {
            name,
            generic_arity,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic_arity == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}`{}", self.name, self.generic_arity)
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name_part, arity) = match s.rsplit_once('`') {
            Some((name_part, arity_part)) => {
                let arity = arity_part.parse::<u16>().map_err(|_| {
                    TypeError::InvalidTypeRef {
                        input: s.to_string(),
                        reason: format!("invalid generic arity {arity_part:?}"),
                    }
                })?;
                (name_part, arity)
            }
            None => (s, 0),
        };
        let name = name_part.parse::<QualifiedName>().map_err(|e| {
            TypeError::InvalidTypeRef {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            name,
            generic_arity: arity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_namespaced() {
        let q: QualifiedName = "game.entities.Player".parse().unwrap();
        assert_eq!(q.namespace, "game.entities");
        assert_eq!(q.name, "Player");
        assert_eq!(q.to_string(), "game.entities.Player");
    }

    #[test]
    fn parse_global() {
        let q: QualifiedName = "Player".parse().unwrap();
        assert_eq!(q.namespace, "");
        assert_eq!(q.name, "Player");
        assert_eq!(q.to_string(), "Player");
    }

    #[test]
    fn reject_empty() {
        assert!("".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!("game. Player".parse::<QualifiedName>().is_err());
        assert!("ga me.Player".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn reject_dot_boundaries() {
        assert!(".Player".parse::<QualifiedName>().is_err());
        assert!("game.".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn reject_empty_components() {
        assert!("game..Player".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn typeref_structural_equality() {
        let a = TypeRef::new(QualifiedName::new("core", "Int"));
        let b = TypeRef::new(QualifiedName::new("core", "Int"));
        let c = TypeRef::with_arity(QualifiedName::new("core", "Int"), 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn typeref_display_with_arity() {
        let t = TypeRef::with_arity(QualifiedName::new("core", "List"), 1);
        assert_eq!(t.to_string(), "core.List`1");
    }

    #[test]
    fn typeref_parse_roundtrip() {
        let t: TypeRef = "core.Map`2".parse().unwrap();
        assert_eq!(t.name, QualifiedName::new("core", "Map"));
        assert_eq!(t.generic_arity, 2);
        assert_eq!(t.to_string(), "core.Map`2");

        let plain: TypeRef = "core.Int".parse().unwrap();
        assert_eq!(plain.generic_arity, 0);
    }

    #[test]
    fn typeref_reject_bad_arity() {
        assert!("core.List`x".parse::<TypeRef>().is_err());
        assert!("core.List`".parse::<TypeRef>().is_err());
    }
}
