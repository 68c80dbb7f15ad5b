use crate::users::UserId;
use actix_session::{Session, SessionExt};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

const PENDING_NONCE_KEY: &str = "nonce";
const USER_ID_KEY: &str = "user_id";

/// Typed view over the cookie-backed session: at most one pending login nonce and, once a magic
/// link is validated, the authenticated user id. State lives only in the signed and encrypted
/// cookie contents; a cookie that fails the integrity check comes back as an empty session.
pub struct UserSession(Session);

impl UserSession {
    /// Returns the nonce recorded for the in-flight login attempt, if any.
    pub fn pending_nonce(&self) -> Option<String> {
        self.0.get::<String>(PENDING_NONCE_KEY).unwrap_or_default()
    }

    /// Records the nonce for a new login attempt, replacing any previously pending nonce.
    pub fn set_pending_nonce(&self, nonce: &str) -> anyhow::Result<()> {
        Ok(self.0.insert(PENDING_NONCE_KEY, nonce)?)
    }

    /// Returns the authenticated user id, if the session is authenticated.
    pub fn user_id(&self) -> Option<UserId> {
        self.0.get::<UserId>(USER_ID_KEY).unwrap_or_default()
    }

    /// Upgrades the session to authenticated. The pending nonce is consumed: once a link is
    /// used, the same nonce can never validate again.
    pub fn set_user_id(&self, user_id: UserId) -> anyhow::Result<()> {
        self.0.remove(PENDING_NONCE_KEY);
        Ok(self.0.insert(USER_ID_KEY, user_id)?)
    }

    /// Removes all session state, both the pending nonce and the authenticated user id.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for UserSession {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(UserSession(req.get_session())))
    }
}
