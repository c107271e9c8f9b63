//! Browser sessions and the one-shot flash notification carried across a
//! redirect.
//!
//! A session is nothing more than a random id in an `HttpOnly` cookie. The
//! only per-session state is the flash slot, held in a [`TimedCache`] so an
//! unread message disappears after a short window.

use crate::cache::TimedCache;
use axum::extract::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "contact_app.sid";

/// Identifies one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept a client-supplied id only if it has the shape we mint.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::try_parse(raw)
            .ok()
            .map(|uuid| Self(uuid.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value that hands this id to the browser.
    pub fn cookie(&self) -> String {
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Find the session id in the request's `Cookie` headers.
fn session_from_cookies(request: &Request) -> Option<SessionId> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

/// Attach a [`SessionId`] to every request, minting one (and setting the
/// cookie on the response) when the browser did not send a valid one.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let (session, minted) = match session_from_cookies(&request) {
        Some(session) => (session, false),
        None => (SessionId::generate(), true),
    };

    request.extensions_mut().insert(session.clone());
    let mut response = next.run(request).await;

    if minted {
        debug!(session = %session, "Started new session");
        if let Ok(value) = HeaderValue::from_str(&session.cookie()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Per-session single-slot message store.
///
/// `queue` overwrites whatever was pending; `consume` hands the message out
/// once and clears the slot.
#[derive(Clone, Debug)]
pub struct FlashStore {
    slots: TimedCache<SessionId, String>,
}

impl FlashStore {
    /// Create a store whose unread messages expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: TimedCache::new(ttl),
        }
    }

    /// Leave `message` for the session's next page.
    pub fn queue(&self, session: &SessionId, message: impl Into<String>) {
        self.slots.cleanup_expired();
        self.slots.insert(session.clone(), message.into());
        trace!(session = %session, "Flash message queued");
    }

    /// Take the pending message, if any, clearing the slot.
    pub fn consume(&self, session: &SessionId) -> Option<String> {
        self.slots.take(session)
    }

    /// How long an unread message survives.
    pub fn ttl(&self) -> Duration {
        self.slots.ttl()
    }
}
