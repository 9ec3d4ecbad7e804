//! Signed session tokens and the cookie that carries them.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

pub const COOKIE_NAME: &str = "psyexam_session";

/// Sessions last thirty days.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC keys derived from the session secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `user_id` valid from `now`.
    pub fn issue_at(&self, user_id: i64, now: jiff::Timestamp) -> Result<String, AuthError> {
        let iat = now.as_second();
        let claims = SessionClaims {
            sub: user_id,
            iat,
            exp: iat + SESSION_TTL_SECS,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        self.issue_at(user_id, jiff::Timestamp::now())
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

/// Attributes applied to the session cookie.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieSettings {
    fn attributes(&self, max_age: i64) -> String {
        let mut attrs = format!("Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
        if let Some(domain) = &self.domain {
            attrs.push_str("; Domain=");
            attrs.push_str(domain);
        }
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value storing `token`.
    pub fn session_cookie(&self, token: &str) -> String {
        format!("{COOKIE_NAME}={token}; {}", self.attributes(SESSION_TTL_SECS))
    }

    /// `Set-Cookie` value that expires the session immediately.
    pub fn clear_cookie(&self) -> String {
        format!("{COOKIE_NAME}=; {}", self.attributes(0))
    }
}

/// Extract the session token from a `Cookie` request header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
