//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the workflow services implementing the driving
//! ports in [`ports`]. Domain code never imports adapter crates such as
//! actix-web or diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, Category, Contact: owned records and their validated fields.
//! - Validate / FieldErrors / Submission: form validation protocol.
//! - CategoryService, ContactService, AccountService, AdminBootstrapService:
//!   workflow implementations.

pub mod ports;

mod access;
mod account_service;
mod admin_bootstrap;
mod auth;
mod category;
mod category_service;
mod contact;
mod contact_service;
mod csrf;
pub mod error;
mod form;
mod trace_id;
pub mod user;

pub use self::access::{authorize, deny_access_unless_granted};
pub use self::account_service::AccountService;
pub use self::admin_bootstrap::AdminBootstrapService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::category::{CATEGORY_NAME_MAX, Category, CategoryForm, CategoryId, CategoryName};
pub use self::category_service::CategoryService;
pub use self::contact::{
    Contact, ContactDetails, ContactForm, ContactId, PERSON_NAME_MAX, PersonName, PhoneNumber,
};
pub use self::contact_service::{ContactService, CreateContactFormHandler, EditContactFormHandler};
pub use self::csrf::{CsrfScope, CsrfVerdict, DeleteOutcome};
pub use self::error::{Error, ErrorCode};
pub use self::form::{FieldErrors, Submission, Validate};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, Role, User, UserDraft, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use carnet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
