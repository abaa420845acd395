//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{
    MockCategoryCommand, MockCategoryQuery, MockContactCommand, MockContactQuery,
    MockCurrentUserQuery, MockLoginService,
};
use crate::domain::{Error, User, UserId};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mock ports for handler tests. Unset ports reject every call.
pub struct MockPorts {
    /// Current-user lookup.
    pub current_user: MockCurrentUserQuery,
    /// Login service.
    pub login: MockLoginService,
    /// Category queries.
    pub categories: MockCategoryQuery,
    /// Category commands.
    pub category_commands: MockCategoryCommand,
    /// Contact queries.
    pub contacts: MockContactQuery,
    /// Contact commands.
    pub contact_commands: MockContactCommand,
}

impl MockPorts {
    /// Mocks whose current-user lookup always yields `user`.
    pub fn signed_in_as(user: &User) -> Self {
        let user = user.clone();
        let mut current_user = MockCurrentUserQuery::new();
        current_user
            .expect_current_user()
            .returning(move |_| Ok(Some(user.clone())));
        Self {
            current_user,
            login: MockLoginService::new(),
            categories: MockCategoryQuery::new(),
            category_commands: MockCategoryCommand::new(),
            contacts: MockContactQuery::new(),
            contact_commands: MockContactCommand::new(),
        }
    }

    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            current_user: Arc::new(self.current_user),
            categories: Arc::new(self.categories),
            category_commands: Arc::new(self.category_commands),
            contacts: Arc::new(self.contacts),
            contact_commands: Arc::new(self.contact_commands),
        }))
    }
}

/// `GET /test/login/{id}`: store `id` in the session.
pub async fn test_login(
    id: web::Path<String>,
    session: SessionContext,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(id.as_str()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Owned copy of the `session` cookie set on `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
