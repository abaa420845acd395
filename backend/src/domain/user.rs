//! User accounts, credentials and roles.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::{FieldErrors, Validate};

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier is blank.
    EmptyId,
    /// Identifier is not a UUID.
    InvalidId,
    /// Username is blank.
    EmptyUsername,
    /// Username is shorter than `min`.
    UsernameTooShort {
        /// Minimum length.
        min: usize,
    },
    /// Username is longer than `max`.
    UsernameTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Username holds characters outside the allowed set.
    UsernameInvalidCharacters,
    /// Email is blank.
    EmptyEmail,
    /// Email is longer than `max`.
    EmailTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Email is not an address.
    InvalidEmail,
    /// No password hash.
    EmptyPasswordHash,
    /// Role name does not match `ROLE_[A-Z0-9_]+`.
    InvalidRole,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, underscores or hyphens",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
            Self::InvalidRole => write!(f, "role must match ROLE_[A-Z0-9_]+"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 180;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 180;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static ROLE_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
    })
}

/// Login name of a user.
///
/// Usernames are trimmed and limited to letters, digits, `.`, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !compiled(&USERNAME_RE, r"^[\p{L}\p{N}._-]+$").is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address in `local@domain` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !compiled(&EMAIL_RE, r"^[^@\s]+@[^@\s]+$").is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password in PHC string format.
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Role name granted to a user, such as `ROLE_USER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Name of the baseline role required by every workflow.
    pub const USER: &'static str = "ROLE_USER";
    /// Name of the administrative role.
    pub const ADMIN: &'static str = "ROLE_ADMIN";

    /// Validate and construct a [`Role`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if !compiled(&ROLE_RE, "^ROLE_[A-Z0-9_]+$").is_match(raw) {
            return Err(UserValidationError::InvalidRole);
        }
        Ok(Self(raw.to_owned()))
    }

    /// `ROLE_USER`.
    #[must_use]
    pub fn user() -> Self {
        Self(Self::USER.to_owned())
    }

    /// `ROLE_ADMIN`.
    #[must_use]
    pub fn admin() -> Self {
        Self(Self::ADMIN.to_owned())
    }

    /// Borrow the role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.0
    }
}

impl TryFrom<String> for Role {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `roles` is never empty.
/// - `password_hash` is an encoded hash, never a plain password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    roles: BTreeSet<Role>,
}

impl User {
    /// Rehydrate a stored account. Adapters use this after loading a row.
    #[must_use]
    pub fn from_parts(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
        roles: BTreeSet<Role>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            roles,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Encoded password.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Roles stored on the account.
    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }
}

/// Unvalidated account data gathered by the admin bootstrap flow.
///
/// [`Validate::validate`] assigns a fresh [`UserId`] and checks every field,
/// reporting failures under `username`, `email`, `password` and `roles`.
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Requested username.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Encoded hash, never the plain password.
    pub password_hash: String,
    /// Role names such as `ROLE_ADMIN`.
    pub roles: Vec<String>,
}

impl Validate for UserDraft {
    type Output = User;

    fn validate(&self) -> Result<User, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = Username::new(&self.username)
            .map_err(|err| errors.add("username", err.to_string()))
            .ok();
        let email = EmailAddress::new(&self.email)
            .map_err(|err| errors.add("email", err.to_string()))
            .ok();
        let password_hash = PasswordHash::new(self.password_hash.clone())
            .map_err(|err| errors.add("password", err.to_string()))
            .ok();

        let mut roles = BTreeSet::new();
        for raw in &self.roles {
            match Role::new(raw) {
                Ok(role) => {
                    roles.insert(role);
                }
                Err(err) => errors.add("roles", format!("{raw}: {err}")),
            }
        }
        if self.roles.is_empty() {
            errors.add("roles", "at least one role is required");
        }

        match (username, email, password_hash) {
            (Some(username), Some(email), Some(password_hash)) if errors.is_empty() => {
                Ok(User::from_parts(
                    UserId::random(),
                    username,
                    email,
                    password_hash,
                    roles,
                ))
            }
            _ => Err(errors),
        }
    }
}
