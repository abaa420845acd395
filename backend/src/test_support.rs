//! Shared builders for unit tests inside the crate.

use std::collections::BTreeSet;

use crate::domain::{
    Category, CategoryName, Contact, ContactForm, EmailAddress, PasswordHash, Role, User, UserId,
    Username, Validate,
};

/// Account holding exactly `roles`.
pub fn user_with_roles(username: &str, roles: &[&str]) -> User {
    User::from_parts(
        UserId::random(),
        Username::new(username).expect("fixture username"),
        EmailAddress::new(format!("{username}@example.com")).expect("fixture email"),
        PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").expect("fixture hash"),
        roles
            .iter()
            .map(|raw| Role::new(raw).expect("fixture role"))
            .collect::<BTreeSet<_>>(),
    )
}

/// Account holding `ROLE_USER`.
pub fn member(username: &str) -> User {
    user_with_roles(username, &[Role::USER])
}

/// Category named `name` owned by `owner`.
pub fn category_for(owner: &User, name: &str) -> Category {
    Category::new(*owner.id(), CategoryName::new(name).expect("fixture name"))
}

/// Contact form with both names filled in.
pub fn contact_form(first: &str, last: &str) -> ContactForm {
    ContactForm {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        ..ContactForm::default()
    }
}

/// Contact built from `contact_form(first, last)` owned by `owner`.
pub fn contact_for(owner: &User, first: &str, last: &str) -> Contact {
    let details = contact_form(first, last)
        .validate()
        .expect("fixture contact");
    Contact::new(*owner.id(), details)
}
