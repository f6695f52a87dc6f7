//! HS256 bearer tokens carrying a [`Principal`].

use crate::models::{Principal, UserRole};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub org: Option<i32>,
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(principal: &Principal, ttl: chrono::Duration) -> Self {
        Self {
            sub: principal.subject.clone(),
            email: principal.email.clone(),
            role: principal.role,
            org: principal.organization_id,
            exp: (chrono::Utc::now() + ttl).timestamp(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            subject: self.sub.clone(),
            email: self.email.clone(),
            role: self.role,
            organization_id: self.org,
        }
    }
}

fn signature(secret: &[u8], signing_input: &str) -> Result<Hmac<Sha256>, String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(|err| {
        tracing::error!("error generating hmac {err:?}");
        "Invalid signing key".to_string()
    })?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

pub fn encode(claims: &JwtClaims, secret: &str) -> Result<String, String> {
    let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});
    let payload = serde_json::to_vec(claims).map_err(|err| err.to_string())?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let mac = signature(secret.as_bytes(), &signing_input)?;
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Verifies the signature and decodes the claims. Expiration is checked
/// separately by [`validate_expiration`].
pub fn decode(token: &str, secret: &str) -> Result<JwtClaims, String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid JWT format: expected 3 parts (header.payload.signature)".to_string());
    }

    let provided = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|e| format!("Failed to decode JWT signature: {}", e))?;
    let signing_input = format!("{}.{}", parts[0], parts[1]);
    signature(secret.as_bytes(), &signing_input)?
        .verify_slice(&provided)
        .map_err(|_| "Invalid JWT signature".to_string())?;

    let decoded = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| format!("Failed to decode JWT payload: {}", e))?;

    serde_json::from_slice(&decoded).map_err(|e| format!("Failed to parse JWT claims: {}", e))
}

pub fn validate_expiration(claims: &JwtClaims) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp();
    if claims.exp < now {
        return Err(format!(
            "JWT token expired (exp: {}, now: {})",
            claims.exp, now
        ));
    }
    Ok(())
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let parts: Vec<&str> = authorization.split_whitespace().collect();
    if parts.len() != 2 {
        return Err("Invalid Authorization header format".to_string());
    }
    if parts[0] != "Bearer" {
        return Err("Expected Bearer scheme in Authorization header".to_string());
    }
    Ok(parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims(exp_offset: i64) -> JwtClaims {
        JwtClaims {
            sub: "17".to_string(),
            email: "mayor@springfield.gov".to_string(),
            role: UserRole::Admin,
            org: Some(1),
            exp: chrono::Utc::now().timestamp() + exp_offset,
        }
    }

    #[test]
    fn encoded_token_decodes_with_same_secret() {
        let original = claims(3600);
        let token = encode(&original, SECRET).unwrap();

        let decoded = decode(&token, SECRET).expect("valid token");
        assert_eq!(decoded, original);
        assert!(validate_expiration(&decoded).is_ok());
        assert_eq!(decoded.principal().organization_id, Some(1));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode(&claims(3600), SECRET).unwrap();
        let err = decode(&token, "other-secret").unwrap_err();
        assert!(err.contains("signature"));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = encode(&claims(3600), SECRET).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut forged = claims(3600);
        forged.org = Some(99);
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let forged_token = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(decode(&forged_token, SECRET).is_err());
    }

    #[test]
    fn expired_token_fails_validation() {
        let token = encode(&claims(-60), SECRET).unwrap();
        let decoded = decode(&token, SECRET).unwrap();
        assert!(validate_expiration(&decoded).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(decode("abc", SECRET).is_err());
        assert!(decode("a.b.c", SECRET).is_err());
    }

    #[test]
    fn bearer_scheme_is_required() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert!(extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(extract_bearer_token("Bearer").is_err());
    }
}
