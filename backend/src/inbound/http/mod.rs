//! HTTP inbound adapter exposing the category, contact and session
//! endpoints.

pub mod auth;
pub mod categories;
pub mod contacts;
pub mod csrf;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every session-authenticated route and the body extractor
/// configuration.
///
/// The caller wraps the enclosing scope in a session middleware and provides
/// `web::Data<HttpState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use carnet::inbound::http::configure;
///
/// let app = App::new().service(web::scope("").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::form_config())
        .app_data(error::json_config())
        .service(users::login)
        .service(users::logout)
        .service(categories::list_categories)
        .service(categories::new_category_form)
        .service(categories::create_category)
        .service(categories::edit_category_form)
        .service(categories::edit_category)
        .service(categories::delete_category)
        .service(contacts::list_contacts)
        .service(contacts::new_contact_form)
        .service(contacts::create_contact)
        .service(contacts::edit_contact_form)
        .service(contacts::edit_contact)
        .service(contacts::delete_contact);
}
