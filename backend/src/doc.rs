//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! form and error schemas, and the session cookie security scheme. Swagger
//! UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, CategoryForm, Contact, ContactForm, Error, ErrorCode};
use crate::inbound::http::categories::CategoryListItem;
use crate::inbound::http::contacts::ContactListItem;
use crate::inbound::http::users::LoginRequest;
use crate::inbound::http::views::DeleteForm;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Carnet API",
        description = "Session-authenticated management of personal categories and contacts.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::new_category_form,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::edit_category_form,
        crate::inbound::http::categories::edit_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::new_contact_form,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::edit_contact_form,
        crate::inbound::http::contacts::edit_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Category,
        CategoryForm,
        CategoryListItem,
        Contact,
        ContactForm,
        ContactListItem,
        LoginRequest,
        DeleteForm
    )),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "categories", description = "Categories owned by the signed-in user"),
        (name = "contacts", description = "Contacts owned by the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    #[case("Category", "createdAt")]
    #[case("Contact", "firstName")]
    fn entity_schemas_use_wire_names(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(name).expect("entity schema"), field);
    }

    #[rstest]
    #[case("CategoryListItem")]
    #[case("ContactListItem")]
    fn list_items_are_documented(#[case] name: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let json = serde_json::to_value(schemas.get(name).expect("list item schema"))
            .expect("serialise schema");
        assert!(json.to_string().contains("deleteToken"), "{name}: {json}");
    }

    #[rstest]
    #[case("/login")]
    #[case("/category")]
    #[case("/category/{id}/edit")]
    #[case("/category/delete/{id}")]
    #[case("/contact/new")]
    #[case("/contact/{id}/delete")]
    #[case("/health/ready")]
    fn registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn declares_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
