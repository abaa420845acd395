//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{
    Contact, ContactDetails, ContactId, EmailAddress, PersonName, PhoneNumber, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ContactRow, ContactUpdate};
use super::pool::DbPool;
use super::schema::contacts;

/// Diesel-backed implementation of the [`ContactRepository`] port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Wrap a shared connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ContactPersistenceError {
    map_diesel_error(
        error,
        ContactPersistenceError::query,
        ContactPersistenceError::connection,
    )
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactPersistenceError> {
    let email = row
        .email
        .as_deref()
        .map(EmailAddress::new)
        .transpose()
        .map_err(|err| {
            ContactPersistenceError::query(format!("stored contact {} is invalid: {err}", row.id))
        })?;
    let details = ContactDetails {
        first_name: PersonName::from_trusted(row.first_name),
        last_name: PersonName::from_trusted(row.last_name),
        email,
        phone: row.phone.map(PhoneNumber::from_trusted),
    };
    Ok(Contact::from_parts(
        ContactId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        details,
        row.created_at,
    ))
}

fn contact_to_row(contact: &Contact) -> ContactRow {
    ContactRow {
        id: *contact.id().as_uuid(),
        owner_id: *contact.owner().as_uuid(),
        first_name: contact.first_name().as_str().to_owned(),
        last_name: contact.last_name().as_str().to_owned(),
        email: contact.email().map(|email| email.as_str().to_owned()),
        phone: contact.phone().map(|phone| phone.as_str().to_owned()),
        created_at: contact.created_at(),
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContactPersistenceError::connection))?;
        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::owner_id.eq(owner.as_uuid()))
            .order((contacts::created_at.asc(), contacts::id.asc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(row_to_contact).collect()
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContactPersistenceError::connection))?;
        contacts::table
            .filter(contacts::id.eq(id.as_uuid()))
            .filter(contacts::owner_id.eq(owner.as_uuid()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(row_to_contact)
            .transpose()
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContactPersistenceError::connection))?;
        diesel::insert_into(contacts::table)
            .values(&contact_to_row(contact))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn update(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContactPersistenceError::connection))?;
        let changes = ContactUpdate {
            first_name: contact.first_name().as_str(),
            last_name: contact.last_name().as_str(),
            email: contact.email().map(EmailAddress::as_str),
            phone: contact.phone().map(PhoneNumber::as_str),
        };
        let updated = diesel::update(
            contacts::table
                .filter(contacts::id.eq(contact.id().as_uuid()))
                .filter(contacts::owner_id.eq(contact.owner().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_error)?;
        if updated == 0 {
            return Err(ContactPersistenceError::query("contact row vanished before update"));
        }
        Ok(())
    }

    async fn remove(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContactPersistenceError::connection))?;
        diesel::delete(
            contacts::table
                .filter(contacts::id.eq(contact.id().as_uuid()))
                .filter(contacts::owner_id.eq(contact.owner().as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactForm, Validate};

    #[test]
    fn rows_round_trip_through_domain() {
        let form = ContactForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: "+44 20".to_owned(),
        };
        let contact = Contact::new(UserId::random(), form.validate().expect("valid"));
        let restored = row_to_contact(contact_to_row(&contact)).expect("valid row");
        assert_eq!(restored, contact);
    }
}
