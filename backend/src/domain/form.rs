//! Form validation primitives shared by the category, contact and user
//! workflows.
//!
//! Forms are plain deserialised payloads. [`Validate`] turns a form into a
//! domain value or a set of [`FieldErrors`] keyed by form field name, and
//! [`Submission`] carries that verdict back to the inbound adapter.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Field-level validation messages keyed by form field name.
///
/// # Examples
/// ```
/// use carnet::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.add("name", "must not be empty");
/// assert_eq!(errors.messages("name"), ["must not be empty"]);
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`, empty when the field is valid.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether any message has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of fields carrying at least one message.
    #[must_use]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Resolve to `value` when no message was recorded.
    #[must_use]
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::invalid_request(format!("validation failed: {errors}"))
            .with_details(json!({ "fields": errors }))
    }
}

/// Validation entry point implemented by forms and new-entity drafts.
pub trait Validate {
    /// Domain value produced when validation succeeds.
    type Output;

    /// Check every constraint, collecting all failures rather than stopping
    /// at the first.
    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

/// Outcome of handling a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// The form was valid and the entity has been persisted.
    Accepted(T),
    /// The form was rejected; nothing was written.
    Rejected(FieldErrors),
}

impl<T> Submission<T> {
    /// Whether the submission was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Trim `raw` and check its character count lies in `min..=max`.
///
/// Returns the trimmed value on success and records a message on `errors`
/// otherwise.
#[must_use]
pub(crate) fn bounded_text(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
) -> Option<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        errors.add(field, "must not be blank");
        None
    } else if length < min {
        errors.add(field, format!("must be at least {min} characters"));
        None
    } else if length > max {
        errors.add(field, format!("must be at most {max} characters"));
        None
    } else {
        Some(trimmed.to_owned())
    }
}
