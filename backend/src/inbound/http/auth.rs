//! Current-user extraction for authenticated handlers.
//!
//! Handlers that take a [`CurrentUser`] argument only run for sessions whose
//! user id still resolves to a stored account; every other request is
//! answered with `401 Unauthorized` before the handler body executes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, User};

/// Authenticated account behind the request, plus its session.
pub struct CurrentUser {
    user: User,
    session: SessionContext,
}

impl CurrentUser {
    /// The logged-in account.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Session of the request, for CSRF token issue and verification.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let id = session.require_user_id()?;
            let Some(user) = state.current_user.current_user(&id).await? else {
                debug!(user_id = %id, "session refers to a missing account");
                return Err(Error::unauthorized("login required").into());
            };
            Ok(Self { user, session })
        })
    }
}
