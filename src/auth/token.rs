use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a signed auth token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id the token was issued for.
    pub sub: String,
    /// Expiry as a unix timestamp (seconds).
    pub exp: i64,
}

/// Signs and verifies the cookie tokens that gate the admin surface.
///
/// Token format: `base64url(claims json) "." base64url(hmac-sha256)`.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    pub fn sign(&self, admin_id: &str, ttl: Duration) -> Result<String> {
        let claims = Claims {
            sub: admin_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&payload)?.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    /// Checks the signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let (payload, signature) = token.split_once('.').ok_or(Error::InvalidTokenFormat)?;

        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| Error::InvalidTokenFormat)?;
        self.mac(payload)?
            .verify_slice(&signature_bytes)
            .map_err(|_| Error::Unauthorized)?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| Error::InvalidTokenFormat)?;
        let claims: Claims = serde_json::from_slice(&payload_bytes)?;

        if claims.exp < Utc::now().timestamp() {
            return Err(Error::TokenExpired);
        }

        Ok(claims)
    }

    fn mac(&self, payload: &str) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::Config(format!("invalid token secret: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}
