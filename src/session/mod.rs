//! Signed cookie sessions. The whole session lives client-side in the
//! `RJ_session` cookie as an HS256 token; nothing is stored on the server.

mod cookie;

use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use cookie::{extract_cookie, CookieConfig};

use crate::config::SessionConfig;

pub const SESSION_COOKIE: &str = "RJ_session";
pub const SESSION_MAX_AGE: Duration = Duration::days(30);

/// Token payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

/// Decoded session handed to request handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn set_user_id(&mut self, user_id: Uuid) {
        self.user_id = Some(user_id);
    }
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    cookie: CookieConfig,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            cookie: CookieConfig {
                name: SESSION_COOKIE.to_string(),
                secure: config.cookie_secure,
                http_only: true,
                path: "/".to_string(),
                max_age_secs: SESSION_MAX_AGE.whole_seconds(),
            },
        }
    }

    /// Reads the session out of the request's cookies. Anything that does not
    /// verify against our secret decodes to an empty session.
    pub fn get_session(&self, headers: &HeaderMap) -> Session {
        let Some(token) = extract_cookie(headers, SESSION_COOKIE) else {
            return Session::new();
        };
        if token.is_empty() {
            return Session::new();
        }
        match decode::<SessionClaims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Session {
                user_id: data.claims.user_id.and_then(|id| id.parse().ok()),
            },
            Err(e) => {
                warn!(error = %e, "rejected session cookie");
                Session::new()
            }
        }
    }

    /// Signs the session and returns the `Set-Cookie` header value.
    pub fn commit(&self, session: &Session) -> anyhow::Result<String> {
        let token = self.sign(session, OffsetDateTime::now_utc())?;
        Ok(self.cookie.build_set_cookie(&token))
    }

    /// `Set-Cookie` header value clearing the session cookie.
    pub fn destroy(&self, _session: Session) -> String {
        self.cookie.build_delete_cookie()
    }

    fn sign(&self, session: &Session, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = now + SESSION_MAX_AGE;
        let claims = SessionClaims {
            user_id: session.user_id.map(|id| id.to_string()),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = ?session.user_id, "session signed");
        Ok(token)
    }
}
