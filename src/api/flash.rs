//! One-shot user messages carried to the next page render in a signed cookie.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use tracing::warn;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// Stretches an arbitrary-length secret into the 64 bytes the cookie key needs.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn push(jar: SignedCookieJar, level: Level, message: impl Into<String>) -> SignedCookieJar {
    let mut flashes = peek(&jar);
    flashes.push(Flash {
        level,
        message: message.into(),
    });

    let value = match serde_json::to_vec(&flashes) {
        Ok(json) => hex::encode(json),
        Err(err) => {
            warn!(error = %err, "failed to encode flash messages");
            return jar;
        }
    };

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

pub fn success(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    push(jar, Level::Success, message)
}

pub fn error(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    push(jar, Level::Error, message)
}

/// Returns pending messages and clears them from the jar.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    let flashes = peek(&jar);
    if flashes.is_empty() {
        return (jar, flashes);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flashes)
}

fn peek(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

fn decode(value: &str) -> Option<Vec<Flash>> {
    let bytes = hex::decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(signing_key("test-secret"))
    }

    #[test]
    fn messages_accumulate_until_taken() {
        let jar = success(jar(), "Delivery created.");
        let jar = error(jar, "Invalid status.");

        let (jar, flashes) = take(jar);
        assert_eq!(
            flashes,
            vec![
                Flash {
                    level: Level::Success,
                    message: "Delivery created.".to_string()
                },
                Flash {
                    level: Level::Error,
                    message: "Invalid status.".to_string()
                },
            ]
        );

        let (_, flashes) = take(jar);
        assert!(flashes.is_empty());
    }

    #[test]
    fn short_secrets_still_produce_a_key() {
        let a = signing_key("x");
        let b = signing_key("x");
        assert_eq!(a.master(), b.master());
        assert_ne!(signing_key("y").master(), a.master());
    }

    #[test]
    fn garbage_cookie_decodes_to_nothing() {
        assert!(decode("not-hex").is_none());
        assert!(decode(&hex::encode(b"{}")).is_none());
    }
}
