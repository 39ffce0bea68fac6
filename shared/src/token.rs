//! Bearer-token payload inspection
//!
//! The client never verifies signatures (it does not hold the signing
//! secret); it only reads the payload segment to decide whether a stored
//! token is still worth presenting to the collaborator API.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried in the collaborator's token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id as the issuer spells it)
    pub sub: String,

    /// Role id; 1 is the administrator role
    #[serde(default)]
    pub rol_id: Option<i64>,

    /// Expiry as a unix timestamp in seconds
    pub exp: i64,

    #[serde(default)]
    pub iat: Option<i64>,
}

/// Decode the payload segment of a JWT without verifying the signature.
///
/// Returns `None` for anything that is not a three-segment token with a
/// base64url-encoded JSON payload.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Whether `token` is expired at `now`.
///
/// Tokens with no readable expiry are treated as expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Some(claims) => now.timestamp() >= claims.exp,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        format!("{}.{}.sig", header, URL_SAFE_NO_PAD.encode(payload.as_bytes()))
    }

    fn at(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(r#"{"sub":"4","rol_id":2,"exp":2000,"iat":1000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "4");
        assert_eq!(claims.rol_id, Some(2));
        assert_eq!(claims.exp, 2000);
        assert_eq!(claims.iat, Some(1000));
    }

    #[test]
    fn test_claims_without_role() {
        let token = make_token(r#"{"sub":"4","exp":2000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.rol_id, None);
    }

    #[test]
    fn test_expiry_boundary() {
        let token = make_token(r#"{"sub":"1","exp":2000}"#);
        assert!(!is_expired(&token, at(1999)));
        // Expiry instant itself counts as expired
        assert!(is_expired(&token, at(2000)));
        assert!(is_expired(&token, at(2001)));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        assert!(is_expired("", at(0)));
        assert!(is_expired("not-a-token", at(0)));
        assert!(is_expired("a.b.c", at(0)));
        let token = make_token("not json");
        assert!(is_expired(&token, at(0)));
    }
}
