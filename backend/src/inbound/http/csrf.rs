//! Session-backed anti-forgery tokens.
//!
//! The session holds a single random secret under `_csrf`. The token for a
//! scope is the hex-encoded HMAC-SHA256 of the scope name keyed by that
//! secret, so listing any number of entities adds nothing to the cookie
//! beyond the secret itself. Verification recomputes the MAC in constant
//! time and never fails the request; it only yields a [`CsrfVerdict`].

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::debug;

use super::session::SessionContext;
use crate::domain::{CsrfScope, CsrfVerdict, Error};

type HmacSha256 = Hmac<Sha256>;

const SECRET_BYTES: usize = 32;
const SECRET_KEY: &str = "_csrf";

/// Token issuer bound to the current request's session.
pub struct CsrfTokens<'a> {
    session: &'a SessionContext,
}

impl<'a> CsrfTokens<'a> {
    /// Bind to `session`; nothing is read until a token is issued or checked.
    #[must_use]
    pub const fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    /// Return the token for `scope`, creating the session secret if needed.
    ///
    /// Tokens are stable for the lifetime of the session, so repeated list
    /// views hand out the same token for the same scope.
    pub fn issue(&self, scope: &CsrfScope) -> Result<String, Error> {
        let secret = match self.secret()? {
            Some(secret) => secret,
            None => self.create_secret()?,
        };
        Ok(hex::encode(mac_for(&secret, scope)?.finalize().into_bytes()))
    }

    /// Compare `submitted` against the token derived for `scope`.
    ///
    /// Missing, blank, malformed or mismatched tokens are
    /// [`CsrfVerdict::Invalid`], as is any token checked before the session
    /// has a secret.
    pub fn verify(&self, scope: &CsrfScope, submitted: Option<&str>) -> Result<CsrfVerdict, Error> {
        let submitted = submitted.map(str::trim).unwrap_or_default();
        if submitted.is_empty() {
            debug!(%scope, "no CSRF token submitted");
            return Ok(CsrfVerdict::Invalid);
        }
        let Ok(tag) = hex::decode(submitted) else {
            debug!(%scope, "CSRF token is not hex");
            return Ok(CsrfVerdict::Invalid);
        };
        let Some(secret) = self.secret()? else {
            debug!(%scope, "no CSRF secret in session");
            return Ok(CsrfVerdict::Invalid);
        };
        Ok(mac_for(&secret, scope)?.verify_slice(&tag).is_ok().into())
    }

    fn secret(&self) -> Result<Option<Vec<u8>>, Error> {
        let stored = self
            .session
            .raw()
            .get::<String>(SECRET_KEY)
            .map_err(|error| Error::internal(format!("failed to read CSRF secret: {error}")))?;
        Ok(stored.and_then(|encoded| hex::decode(encoded).ok()))
    }

    fn create_secret(&self) -> Result<Vec<u8>, Error> {
        let mut secret = vec![0_u8; SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut secret);
        self.session
            .raw()
            .insert(SECRET_KEY, hex::encode(&secret))
            .map_err(|error| Error::internal(format!("failed to store CSRF secret: {error}")))?;
        Ok(secret)
    }
}

fn mac_for(secret: &[u8], scope: &CsrfScope) -> Result<HmacSha256, Error> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|error| Error::internal(format!("invalid CSRF secret: {error}")))?;
    mac.update(scope.as_str().as_bytes());
    Ok(mac)
}
