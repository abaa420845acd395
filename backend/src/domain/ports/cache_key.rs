//! Cache key and scoping policy for the category list cache.
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::UserId;

/// Literal key shared by every user when the cache scope is global.
pub const GLOBAL_CATEGORY_CACHE_KEY: &str = "categories";

/// Key under which a category list is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryCacheKey(String);

impl CategoryCacheKey {
    /// The shared `"categories"` key.
    #[must_use]
    pub fn global() -> Self {
        Self(GLOBAL_CATEGORY_CACHE_KEY.to_owned())
    }

    /// Key private to `owner`, `"categories:<uuid>"`.
    #[must_use]
    pub fn for_owner(owner: &UserId) -> Self {
        Self(format!("{GLOBAL_CATEGORY_CACHE_KEY}:{owner}"))
    }

    /// Borrow the underlying key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CategoryCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CategoryCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// How category list cache keys are derived.
///
/// `Global` keeps one list for every user, so a warm list populated by one
/// user is served to the next. `PerOwner` gives each user a private key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryCacheScope {
    /// One `categories` key for every user.
    #[default]
    Global,
    /// A `categories:<uuid>` key per user.
    PerOwner,
}

impl CategoryCacheScope {
    /// Key used for `owner`'s category list under this scope.
    ///
    /// # Examples
    /// ```
    /// use carnet::domain::UserId;
    /// use carnet::domain::ports::CategoryCacheScope;
    ///
    /// let owner = UserId::random();
    /// assert_eq!(CategoryCacheScope::Global.key_for(&owner).as_str(), "categories");
    /// assert_eq!(
    ///     CategoryCacheScope::PerOwner.key_for(&owner).to_string(),
    ///     format!("categories:{owner}"),
    /// );
    /// ```
    #[must_use]
    pub fn key_for(self, owner: &UserId) -> CategoryCacheKey {
        match self {
            Self::Global => CategoryCacheKey::global(),
            Self::PerOwner => CategoryCacheKey::for_owner(owner),
        }
    }
}

/// Error returned when parsing an unknown cache scope name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category cache scope `{0}`; expected `global` or `per-owner`")]
pub struct CategoryCacheScopeParseError(String);

impl FromStr for CategoryCacheScope {
    type Err = CategoryCacheScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per-owner" | "per_owner" => Ok(Self::PerOwner),
            _ => Err(CategoryCacheScopeParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("global", CategoryCacheScope::Global)]
    #[case(" GLOBAL ", CategoryCacheScope::Global)]
    #[case("per-owner", CategoryCacheScope::PerOwner)]
    #[case("per_owner", CategoryCacheScope::PerOwner)]
    fn parses_scope_names(#[case] raw: &str, #[case] expected: CategoryCacheScope) {
        assert_eq!(raw.parse::<CategoryCacheScope>().expect("scope"), expected);
    }

    #[test]
    fn rejects_unknown_scope() {
        let err = "per-tenant"
            .parse::<CategoryCacheScope>()
            .expect_err("unknown scope");
        assert!(err.to_string().contains("per-tenant"));
    }

    #[test]
    fn global_scope_ignores_owner() {
        let first = CategoryCacheScope::Global.key_for(&UserId::random());
        let second = CategoryCacheScope::Global.key_for(&UserId::random());
        assert_eq!(first, second);
        assert_eq!(first.as_str(), GLOBAL_CATEGORY_CACHE_KEY);
    }

    #[test]
    fn per_owner_scope_separates_users() {
        let first = CategoryCacheScope::PerOwner.key_for(&UserId::random());
        let second = CategoryCacheScope::PerOwner.key_for(&UserId::random());
        assert_ne!(first, second);
    }
}
