//! Response shapes shared by the category and contact handlers.
//!
//! Form endpoints answer `200` with a [`FormView`] when rendering, `422` with
//! the same view when a submission is rejected, and `303 See Other` to the
//! index route when it is accepted.

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, FieldErrors};

/// Submitted values paired with their validation messages.
#[derive(Debug, Serialize)]
pub struct FormView<F> {
    /// Values as submitted, or the blank/prefilled form.
    pub form: F,
    /// Messages keyed by field name; empty for blank views.
    pub errors: FieldErrors,
}

impl<F: Serialize> FormView<F> {
    /// Fresh view with no messages.
    #[must_use]
    pub fn blank(form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::default(),
        }
    }

    /// View re-rendering a rejected submission.
    #[must_use]
    pub fn rejected(form: F, errors: FieldErrors) -> Self {
        Self { form, errors }
    }

    /// `200 OK` for blank views, `422 Unprocessable Entity` when messages
    /// are present.
    pub fn respond(&self) -> HttpResponse {
        let status = if self.errors.is_empty() {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        HttpResponse::build(status).json(self)
    }
}

/// Form body of delete requests.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct DeleteForm {
    /// Anti-forgery token issued with the list.
    #[serde(rename = "_token", default)]
    pub token: Option<String>,
}

/// `303 See Other` pointing at `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Parse a route identifier; anything but a UUID is an unknown resource.
pub fn parse_route_id(raw: &str, resource: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found(format!("{resource} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("42")]
    #[case("")]
    fn non_uuid_route_ids_are_not_found(#[case] raw: &str) {
        let err = parse_route_id(raw, "category").expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn rejected_views_are_unprocessable() {
        let mut errors = FieldErrors::default();
        errors.add("name", "must not be blank");
        let response = FormView::rejected(serde_json::json!({"name": ""}), errors).respond();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn see_other_sets_location() {
        let response = see_other("/category");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/category".as_slice())
        );
    }
}
