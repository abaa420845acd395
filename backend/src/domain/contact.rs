//! Contacts owned by a user.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::form::{FieldErrors, Validate, bounded_text};
use super::{EmailAddress, UserId};

/// Maximum length of a first or last name in characters.
pub const PERSON_NAME_MAX: usize = 100;
/// Minimum length of a phone number in characters.
pub const PHONE_MIN: usize = 3;
/// Maximum length of a phone number in characters.
pub const PHONE_MAX: usize = 32;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[0-9 +\-.()]+$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Stable contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
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

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    fn parse(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<Self> {
        bounded_text(errors, field, raw, 1, PERSON_NAME_MAX).map(Self)
    }

    /// Build from a value already known to be valid, such as a stored row.
    #[must_use]
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Phone number made of digits, spaces and `+ - . ( )`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    fn parse(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<Self> {
        let value = bounded_text(errors, field, raw, PHONE_MIN, PHONE_MAX)?;
        if phone_regex().is_match(&value) {
            Some(Self(value))
        } else {
            errors.add(
                field,
                "may only contain digits, spaces, plus, hyphen, dot or parentheses",
            );
            None
        }
    }

    /// Build from a value already known to be valid, such as a stored row.
    #[must_use]
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated editable fields of a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Optional email address.
    pub email: Option<EmailAddress>,
    /// Optional phone number.
    pub phone: Option<PhoneNumber>,
}

/// Contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[schema(value_type = Uuid)]
    id: ContactId,
    /// Identifier of the owning user.
    #[schema(value_type = Uuid)]
    owner: UserId,
    #[schema(value_type = String, example = "Ada")]
    first_name: PersonName,
    #[schema(value_type = String, example = "Lovelace")]
    last_name: PersonName,
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    email: Option<EmailAddress>,
    #[schema(value_type = Option<String>)]
    phone: Option<PhoneNumber>,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl Contact {
    /// Rehydrate a stored contact.
    #[must_use]
    pub fn from_parts(
        id: ContactId,
        owner: UserId,
        details: ContactDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ContactDetails {
            first_name,
            last_name,
            email,
            phone,
        } = details;
        Self {
            id,
            owner,
            first_name,
            last_name,
            email,
            phone,
            created_at,
        }
    }

    /// Start a new contact owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, details: ContactDetails) -> Self {
        Self::from_parts(ContactId::random(), owner, details, Utc::now())
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Email address, if one was given.
    #[must_use]
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Phone number, if one was given.
    #[must_use]
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Insertion timestamp used for list ordering.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrite the editable fields, keeping identity and ownership.
    pub fn apply(&mut self, details: ContactDetails) {
        self.first_name = details.first_name;
        self.last_name = details.last_name;
        self.email = details.email;
        self.phone = details.phone;
    }
}

/// Submitted contact form. Blank optional fields mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    /// Required, at most 100 characters.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Required, at most 100 characters.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Optional; validated when present.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Optional; 3 to 32 of digits, spaces and `+-.()`.
    #[schema(example = "+44 20 7946 0000")]
    pub phone: String,
}

impl ContactForm {
    /// Form pre-filled from an existing contact.
    #[must_use]
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name().as_str().to_owned(),
            last_name: contact.last_name().as_str().to_owned(),
            email: contact
                .email()
                .map(|email| email.as_str().to_owned())
                .unwrap_or_default(),
            phone: contact
                .phone()
                .map(|phone| phone.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}

impl Validate for ContactForm {
    type Output = ContactDetails;

    fn validate(&self) -> Result<ContactDetails, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = PersonName::parse(&mut errors, "first_name", &self.first_name);
        let last_name = PersonName::parse(&mut errors, "last_name", &self.last_name);

        let email = if self.email.trim().is_empty() {
            None
        } else {
            match EmailAddress::new(&self.email) {
                Ok(email) => Some(email),
                Err(err) => {
                    errors.add("email", err.to_string());
                    None
                }
            }
        };
        let phone = if self.phone.trim().is_empty() {
            None
        } else {
            PhoneNumber::parse(&mut errors, "phone", &self.phone)
        };

        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) if errors.is_empty() => Ok(ContactDetails {
                first_name,
                last_name,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn form() -> ContactForm {
        ContactForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: String::new(),
            phone: String::new(),
        }
    }

    #[rstest]
    fn optional_fields_default_to_none(form: ContactForm) {
        let details = form.validate().expect("valid");
        assert!(details.email.is_none());
        assert!(details.phone.is_none());
    }

    #[rstest]
    #[case("+44 (0)20 7946-0000", true)]
    #[case("555.1234", true)]
    #[case("12", false)]
    #[case("call me", false)]
    fn phone_numbers_follow_character_rules(
        mut form: ContactForm,
        #[case] phone: &str,
        #[case] valid: bool,
    ) {
        form.phone = phone.to_owned();
        let result = form.validate();
        assert_eq!(result.is_ok(), valid);
        if let Err(errors) = result {
            assert_eq!(errors.fields().collect::<Vec<_>>(), ["phone"]);
        }
    }

    #[rstest]
    fn rejects_malformed_email(mut form: ContactForm) {
        form.email = "ada-at-example".to_owned();
        let errors = form.validate().expect_err("bad email");
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["email"]);
    }

    #[rstest]
    fn requires_both_names(mut form: ContactForm) {
        form.first_name = " ".to_owned();
        form.last_name = "x".repeat(PERSON_NAME_MAX + 1);
        let errors = form.validate().expect_err("names invalid");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["first_name", "last_name"]
        );
    }

    #[rstest]
    fn apply_keeps_identity(form: ContactForm) {
        let owner = UserId::random();
        let mut contact = Contact::new(owner, form.validate().expect("valid"));
        let id = contact.id();
        let mut edited = form;
        edited.email = "ada@example.com".to_owned();
        contact.apply(edited.validate().expect("valid"));
        assert_eq!(contact.id(), id);
        assert_eq!(contact.owner(), &owner);
        assert_eq!(
            contact.email().map(EmailAddress::as_str),
            Some("ada@example.com")
        );
    }

    #[rstest]
    fn form_round_trips_from_contact(form: ContactForm) {
        let contact = Contact::new(UserId::random(), form.validate().expect("valid"));
        assert_eq!(ContactForm::from_contact(&contact), form);
    }
}
