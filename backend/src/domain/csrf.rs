//! Anti-forgery scopes and verdicts.
//!
//! Session-bound token storage lives in the inbound adapter because sessions
//! are request-local. The domain only sees the scope a token was issued for
//! and the verdict of comparing a submitted token against it.

use std::fmt;

/// Name under which a CSRF token is issued and verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CsrfScope(String);

impl CsrfScope {
    /// Scope guarding deletion of the entity identified by `id`.
    ///
    /// # Examples
    /// ```
    /// use carnet::domain::CsrfScope;
    ///
    /// assert_eq!(CsrfScope::delete("42").as_str(), "delete42");
    /// ```
    #[must_use]
    pub fn delete(id: impl fmt::Display) -> Self {
        Self(format!("delete{id}"))
    }

    /// Borrow the scope name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CsrfScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of checking a submitted token against its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfVerdict {
    /// The token matches its scope.
    Valid,
    /// Missing, malformed or mismatched.
    Invalid,
}

impl CsrfVerdict {
    /// Whether the submitted token matched.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<bool> for CsrfVerdict {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}

/// Result of a CSRF-guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The token matched and the entity was removed.
    Removed,
    /// The token did not match; nothing was touched.
    Skipped,
}
