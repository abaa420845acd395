//! Categories owned by a user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;
use super::form::{FieldErrors, Validate, bounded_text};

/// Maximum length of a category name in characters.
pub const CATEGORY_NAME_MAX: usize = 255;

/// Stable category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Generate a new random identifier.
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

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed, non-empty category name of at most [`CATEGORY_NAME_MAX`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate and construct a [`CategoryName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = bounded_text(&mut errors, "name", raw.as_ref(), 1, CATEGORY_NAME_MAX);
        match name {
            Some(name) => Ok(Self(name)),
            None => Err(errors),
        }
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = FieldErrors;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Category record.
///
/// Serialised as camelCase JSON; the same shape is stored in the category
/// list cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[schema(value_type = Uuid)]
    id: CategoryId,
    #[schema(value_type = String, example = "Family")]
    name: CategoryName,
    /// Identifier of the owning user.
    #[schema(value_type = Uuid)]
    owner: UserId,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl Category {
    /// Rehydrate a stored category.
    #[must_use]
    pub fn from_parts(
        id: CategoryId,
        name: CategoryName,
        owner: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            created_at,
        }
    }

    /// Start a new category owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, name: CategoryName) -> Self {
        Self::from_parts(CategoryId::random(), name, owner, Utc::now())
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Insertion timestamp used for list ordering.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the name, keeping identity and ownership.
    pub fn rename(&mut self, name: CategoryName) {
        self.name = name;
    }
}

/// Submitted category form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryForm {
    /// Display name, 1 to 255 characters after trimming.
    #[serde(default)]
    #[schema(example = "Family")]
    pub name: String,
}

impl CategoryForm {
    /// Form pre-filled from an existing category.
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name().as_str().to_owned(),
        }
    }
}

impl Validate for CategoryForm {
    type Output = CategoryName;

    fn validate(&self) -> Result<CategoryName, FieldErrors> {
        CategoryName::new(&self.name)
    }
}
