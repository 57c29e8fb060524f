//! The persisted session.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::tokens::{AccessToken, RefreshToken, TokenPair};

const ACCESS_TOKEN_KEY: &str = "accessToken";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// The current credentials, plus whatever else the login flow stored
/// alongside them.
///
/// A session always carries both tokens. Stored data with only one of the
/// two is not a session and decodes to `None`.
#[derive(Clone, PartialEq, Serialize)]
pub struct Session {
    #[serde(rename = "accessToken")]
    access_token: AccessToken,
    #[serde(rename = "refreshToken")]
    refresh_token: RefreshToken,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Session {
    /// Create a session from a token pair with no extra fields.
    pub fn new(tokens: TokenPair) -> Self {
        Self::with_extra(tokens, Map::new())
    }

    /// Create a session from a token pair and additional fields (for
    /// example the user profile returned by login).
    pub fn with_extra(tokens: TokenPair, mut extra: Map<String, Value>) -> Self {
        extra.remove(ACCESS_TOKEN_KEY);
        extra.remove(REFRESH_TOKEN_KEY);
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            extra,
        }
    }

    /// Decode a stored session. Malformed JSON, a non-object, a missing or
    /// empty token all yield `None`.
    pub fn decode(raw: &str) -> Option<Self> {
        let Value::Object(mut map) = serde_json::from_str::<Value>(raw).ok()? else {
            return None;
        };

        let access = take_token(&mut map, ACCESS_TOKEN_KEY)?;
        let refresh = take_token(&mut map, REFRESH_TOKEN_KEY)?;

        Some(Self {
            access_token: AccessToken::new(access),
            refresh_token: RefreshToken::new(refresh),
            extra: map,
        })
    }

    /// Encode for storage.
    pub fn encode(&self) -> String {
        // A struct of strings and JSON values always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns a copy with both tokens replaced and every other field kept.
    pub fn rotate(&self, tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            extra: self.extra.clone(),
        }
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Fields stored alongside the tokens.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

fn take_token(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tokens", &"[REDACTED]")
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_complete_session_with_extra_fields() {
        let raw = r#"{"accessToken":"T1","refreshToken":"R1","user":{"name":"Ada"}}"#;
        let session = Session::decode(raw).unwrap();
        assert_eq!(session.access_token().as_str(), "T1");
        assert_eq!(session.refresh_token().as_str(), "R1");
        assert_eq!(session.extra()["user"], json!({"name": "Ada"}));
    }

    #[test]
    fn half_session_is_no_session() {
        assert!(Session::decode(r#"{"accessToken":"T1"}"#).is_none());
        assert!(Session::decode(r#"{"refreshToken":"R1"}"#).is_none());
        assert!(Session::decode(r#"{"accessToken":"","refreshToken":"R1"}"#).is_none());
        assert!(Session::decode(r#"{"accessToken":1,"refreshToken":"R1"}"#).is_none());
    }

    #[test]
    fn malformed_data_is_no_session() {
        assert!(Session::decode("").is_none());
        assert!(Session::decode("{not json").is_none());
        assert!(Session::decode(r#"["T1","R1"]"#).is_none());
        assert!(Session::decode("null").is_none());
    }

    #[test]
    fn rotate_keeps_other_fields() {
        let mut extra = Map::new();
        extra.insert("user".into(), json!({"id": 7}));
        let session = Session::with_extra(TokenPair::new("T1", "R1"), extra);

        let rotated = session.rotate(TokenPair::new("T2", "R2"));
        assert_eq!(rotated.access_token().as_str(), "T2");
        assert_eq!(rotated.refresh_token().as_str(), "R2");
        assert_eq!(rotated.extra()["user"], json!({"id": 7}));
    }

    #[test]
    fn encode_then_decode_preserves_layout() {
        let mut extra = Map::new();
        extra.insert("role".into(), json!("admin"));
        let session = Session::with_extra(TokenPair::new("T1", "R1"), extra);

        let value: Value = serde_json::from_str(&session.encode()).unwrap();
        assert_eq!(
            value,
            json!({"accessToken": "T1", "refreshToken": "R1", "role": "admin"})
        );
        assert_eq!(Session::decode(&session.encode()), Some(session));
    }

    #[test]
    fn extra_cannot_shadow_tokens() {
        let mut extra = Map::new();
        extra.insert("accessToken".into(), json!("stale"));
        let session = Session::with_extra(TokenPair::new("T1", "R1"), extra);
        assert!(session.extra().is_empty());
    }

    #[test]
    fn debug_hides_tokens() {
        let session = Session::new(TokenPair::new("secret-access", "secret-refresh"));
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret"));
    }
}
