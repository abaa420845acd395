//! Driving ports for the contact workflow.

use async_trait::async_trait;

use crate::domain::{
    Contact, ContactForm, ContactId, CsrfVerdict, DeleteOutcome, Error, Submission, User,
};

/// Read side of the contact workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactQuery: Send + Sync {
    /// Contacts owned by `user`, oldest first. Never cached.
    async fn list(&self, user: &User) -> Result<Vec<Contact>, Error>;

    /// Resolve a route id to one of `user`'s contacts, 404 otherwise.
    async fn resolve(&self, user: &User, id: &ContactId) -> Result<Contact, Error>;
}

/// Write side of the contact workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Hand `form` to the create form handler.
    async fn create(&self, user: &User, form: &ContactForm) -> Result<Submission<Contact>, Error>;

    /// Hand `form` and `contact` to the edit form handler.
    async fn edit(
        &self,
        user: &User,
        contact: Contact,
        form: &ContactForm,
    ) -> Result<Submission<Contact>, Error>;

    /// Remove `contact` when `verdict` is valid; otherwise do nothing.
    async fn delete(
        &self,
        user: &User,
        contact: &Contact,
        verdict: CsrfVerdict,
    ) -> Result<DeleteOutcome, Error>;
}

/// Decides a contact form submission and persists accepted ones.
///
/// `Target` is the entity the form applies to: nothing for creation, the
/// resolved contact for edits.
#[async_trait]
pub trait ContactFormHandler: Send + Sync {
    /// Entity the form applies to.
    type Target: Send + 'static;

    /// Validate `form` and, when valid, store the result for `owner`.
    async fn handle(
        &self,
        owner: &User,
        form: &ContactForm,
        target: Self::Target,
    ) -> Result<Submission<Contact>, Error>;
}
