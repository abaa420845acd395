//! Role-based access checks applied at the top of every workflow operation.
//!
//! Roles form a small fixed hierarchy: `ROLE_ADMIN` implies `ROLE_USER`.
//! Stored roles are never rewritten; the hierarchy is applied only when
//! checking access.

use tracing::warn;

use super::{Error, Role, User};

/// Roles reachable from `role` through the hierarchy, including itself.
fn reachable(role: &Role) -> Vec<&str> {
    match role.as_str() {
        Role::ADMIN => vec![Role::ADMIN, Role::USER],
        other => vec![other],
    }
}

/// Whether `user` is granted `required`, directly or through the hierarchy.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
///
/// use carnet::domain::{
///     EmailAddress, PasswordHash, Role, User, UserId, Username, authorize,
/// };
///
/// let admin = User::from_parts(
///     UserId::random(),
///     Username::new("alice").unwrap(),
///     EmailAddress::new("a@x.com").unwrap(),
///     PasswordHash::new("$argon2id$stub").unwrap(),
///     BTreeSet::from([Role::admin()]),
/// );
/// assert!(authorize(&admin, Role::USER));
/// ```
#[must_use]
pub fn authorize(user: &User, required: &str) -> bool {
    user.roles()
        .iter()
        .any(|role| reachable(role).contains(&required))
}

/// Fail with [`Error::forbidden`] unless `user` is granted `required`.
pub fn deny_access_unless_granted(user: &User, required: &str) -> Result<(), Error> {
    if authorize(user, required) {
        return Ok(());
    }
    warn!(user_id = %user.id(), role = required, "access denied");
    Err(Error::forbidden(format!("access requires {required}")))
}
