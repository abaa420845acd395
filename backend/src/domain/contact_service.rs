//! Contact workflow service and its form handlers.
//!
//! Contacts are never cached. Create and edit submissions are decided by
//! [`ContactFormHandler`] implementations which validate the form and persist
//! accepted results.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ContactCommand, ContactFormHandler, ContactPersistenceError, ContactQuery, ContactRepository,
};
use crate::domain::{
    Contact, ContactForm, ContactId, CsrfVerdict, DeleteOutcome, Error, Role, Submission, User,
    Validate, deny_access_unless_granted,
};

fn map_repository_error(error: ContactPersistenceError) -> Error {
    match error {
        ContactPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactPersistenceError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

/// Form handler creating a new contact owned by the submitter.
pub struct CreateContactFormHandler<R> {
    repository: Arc<R>,
}

impl<R> CreateContactFormHandler<R> {
    /// Handler writing through `repository`.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ContactRepository> ContactFormHandler for CreateContactFormHandler<R> {
    type Target = ();

    async fn handle(
        &self,
        owner: &User,
        form: &ContactForm,
        _target: (),
    ) -> Result<Submission<Contact>, Error> {
        let details = match form.validate() {
            Ok(details) => details,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };
        let contact = Contact::new(*owner.id(), details);
        self.repository
            .insert(&contact)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %contact.id(), owner = %owner.id(), "contact created");
        Ok(Submission::Accepted(contact))
    }
}

/// Form handler applying an edit to an existing contact.
pub struct EditContactFormHandler<R> {
    repository: Arc<R>,
}

impl<R> EditContactFormHandler<R> {
    /// Handler writing through `repository`.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ContactRepository> ContactFormHandler for EditContactFormHandler<R> {
    type Target = Contact;

    async fn handle(
        &self,
        owner: &User,
        form: &ContactForm,
        mut contact: Contact,
    ) -> Result<Submission<Contact>, Error> {
        if contact.owner() != owner.id() {
            return Err(Error::not_found("contact not found"));
        }
        let details = match form.validate() {
            Ok(details) => details,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };
        contact.apply(details);
        self.repository
            .update(&contact)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %contact.id(), owner = %owner.id(), "contact updated");
        Ok(Submission::Accepted(contact))
    }
}

/// Contact service implementing [`ContactQuery`] and [`ContactCommand`].
pub struct ContactService<R> {
    repository: Arc<R>,
    create_handler: CreateContactFormHandler<R>,
    edit_handler: EditContactFormHandler<R>,
}

impl<R> ContactService<R> {
    /// Create a service whose form handlers share `repository`.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            create_handler: CreateContactFormHandler::new(Arc::clone(&repository)),
            edit_handler: EditContactFormHandler::new(Arc::clone(&repository)),
            repository,
        }
    }
}

#[async_trait]
impl<R: ContactRepository> ContactQuery for ContactService<R> {
    async fn list(&self, user: &User) -> Result<Vec<Contact>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        self.repository
            .list_by_owner(user.id())
            .await
            .map_err(map_repository_error)
    }

    async fn resolve(&self, user: &User, id: &ContactId) -> Result<Contact, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        self.repository
            .find_by_id(user.id(), id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("contact not found"))
    }
}

#[async_trait]
impl<R: ContactRepository> ContactCommand for ContactService<R> {
    async fn create(&self, user: &User, form: &ContactForm) -> Result<Submission<Contact>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        self.create_handler.handle(user, form, ()).await
    }

    async fn edit(
        &self,
        user: &User,
        contact: Contact,
        form: &ContactForm,
    ) -> Result<Submission<Contact>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        self.edit_handler.handle(user, form, contact).await
    }

    async fn delete(
        &self,
        user: &User,
        contact: &Contact,
        verdict: CsrfVerdict,
    ) -> Result<DeleteOutcome, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        if contact.owner() != user.id() {
            return Err(Error::not_found("contact not found"));
        }
        if !verdict.is_valid() {
            warn!(contact_id = %contact.id(), "contact delete skipped: invalid CSRF token");
            return Ok(DeleteOutcome::Skipped);
        }

        self.repository
            .remove(contact)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %contact.id(), owner = %user.id(), "contact deleted");
        Ok(DeleteOutcome::Removed)
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
