//! Contact HTTP handlers.
//!
//! ```text
//! GET    /contact
//! GET    /contact/new
//! POST   /contact/new              first_name=Ada&last_name=Lovelace
//! GET    /contact/{id}/edit
//! POST   /contact/{id}/edit        first_name=Ada&last_name=King
//! DELETE /contact/{id}/delete      _token=<hex>
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::auth::CurrentUser;
use super::csrf::CsrfTokens;
use super::state::HttpState;
use super::views::{DeleteForm, FormView, parse_route_id, see_other};
use crate::domain::{
    ApiResult, Contact, ContactForm, ContactId, CsrfScope, Error, Role, Submission,
    deny_access_unless_granted,
};

const INDEX: &str = "/contact";

/// Listed contact with the token needed to delete it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactListItem {
    /// The contact itself, flattened into the item.
    #[serde(flatten)]
    pub contact: Contact,
    /// Value to submit as `_token` when deleting this contact.
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub delete_token: String,
}

async fn resolve(state: &HttpState, current: &CurrentUser, raw_id: &str) -> ApiResult<Contact> {
    let id = ContactId::from_uuid(parse_route_id(raw_id, "contact")?);
    state.contacts.resolve(current.user(), &id).await
}

fn respond(submission: Submission<Contact>, form: ContactForm) -> HttpResponse {
    match submission {
        Submission::Accepted(_) => see_other(INDEX),
        Submission::Rejected(errors) => FormView::rejected(form, errors).respond(),
    }
}

/// List the caller's contacts, oldest first.
#[utoipa::path(
    get,
    path = "/contact",
    responses(
        (status = 200, description = "Contacts with delete tokens", body = [ContactListItem]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contact")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    current: CurrentUser,
) -> ApiResult<web::Json<Vec<ContactListItem>>> {
    let contacts = state.contacts.list(current.user()).await?;
    let tokens = CsrfTokens::new(current.session());
    let mut items = Vec::with_capacity(contacts.len());
    for contact in contacts {
        let delete_token = tokens.issue(&CsrfScope::delete(contact.id()))?;
        items.push(ContactListItem {
            contact,
            delete_token,
        });
    }
    Ok(web::Json(items))
}

/// Render an empty contact form.
#[utoipa::path(
    get,
    path = "/contact/new",
    responses(
        (status = 200, description = "Empty form view"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "newContactForm"
)]
#[get("/contact/new")]
pub async fn new_contact_form(current: CurrentUser) -> ApiResult<HttpResponse> {
    deny_access_unless_granted(current.user(), Role::USER)?;
    Ok(FormView::blank(ContactForm::default()).respond())
}

/// Create a contact owned by the caller.
#[utoipa::path(
    post,
    path = "/contact/new",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 422, description = "Rejected form view")
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contact/new")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    current: CurrentUser,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let submission = state.contact_commands.create(current.user(), &form).await?;
    Ok(respond(submission, form))
}

/// Render the edit form of one of the caller's contacts.
#[utoipa::path(
    get,
    path = "/contact/{id}/edit",
    params(("id" = String, Path, description = "Contact UUID")),
    responses(
        (status = 200, description = "Form view filled from the contact"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign contact", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "editContactForm"
)]
#[get("/contact/{id}/edit")]
pub async fn edit_contact_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let contact = resolve(&state, &current, &id).await?;
    Ok(FormView::blank(ContactForm::from_contact(&contact)).respond())
}

/// Update one of the caller's contacts.
#[utoipa::path(
    post,
    path = "/contact/{id}/edit",
    params(("id" = String, Path, description = "Contact UUID")),
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign contact", body = Error),
        (status = 422, description = "Rejected form view")
    ),
    tags = ["contacts"],
    operation_id = "editContact"
)]
#[post("/contact/{id}/edit")]
pub async fn edit_contact(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let contact = resolve(&state, &current, &id).await?;
    let form = form.into_inner();
    let submission = state
        .contact_commands
        .edit(current.user(), contact, &form)
        .await?;
    Ok(respond(submission, form))
}

/// Delete one of the caller's contacts when the `_token` matches.
#[utoipa::path(
    delete,
    path = "/contact/{id}/delete",
    params(("id" = String, Path, description = "Contact UUID")),
    request_body(content = DeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign contact", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contact/{id}/delete")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
    form: Option<web::Form<DeleteForm>>,
) -> ApiResult<HttpResponse> {
    let contact = resolve(&state, &current, &id).await?;
    let submitted = form.and_then(|form| form.into_inner().token);
    let verdict = CsrfTokens::new(current.session())
        .verify(&CsrfScope::delete(contact.id()), submitted.as_deref())?;
    state
        .contact_commands
        .delete(current.user(), &contact, verdict)
        .await?;
    Ok(see_other(INDEX))
}
