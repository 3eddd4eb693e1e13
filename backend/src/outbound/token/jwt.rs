//! HS256 JSON Web Token adapter for the token ports.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenIssuer, TokenIssuerError, TokenVerifier};
use crate::domain::{Role, SessionClaims, SessionToken, User, UserId, Username};

/// Wire claims carried by every session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    username: String,
    role: String,
    iat: i64,
    exp: i64,
    jti: Uuid,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// Build an issuer whose tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<SessionToken, TokenIssuerError> {
        let now = Utc::now();
        let claims = Claims {
            sub: *user.id().as_uuid(),
            username: user.username().to_string(),
            role: user.role().as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken::new)
            .map_err(|err| TokenIssuerError::issue(err.to_string()))
    }
}

impl TokenVerifier for JwtTokenIssuer {
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenIssuerError::invalid(err.to_string()))?
            .claims;
        Ok(SessionClaims {
            user_id: UserId::from_uuid(claims.sub),
            username: Username::new(&claims.username)
                .map_err(|err| TokenIssuerError::invalid(err.to_string()))?,
            role: claims
                .role
                .parse::<Role>()
                .map_err(|err| TokenIssuerError::invalid(err.to_string()))?,
        })
    }
}
