//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! token parsing, verification and role checks here. A missing or invalid
//! token yields `401`, as does a valid token whose account has since been
//! deleted. The role is re-read from the account store on every request, so
//! a caller whose current role lacks the capability gets `403`.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::UserAccountError;
use crate::domain::{Capability, DomainError, SessionClaims, UserId};

use super::ApiResult;
use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(SessionClaims);

impl Authenticated {
    /// Verified claims, with the role refreshed from the account store.
    #[must_use]
    pub const fn claims(&self) -> &SessionClaims {
        &self.0
    }

    /// Id of the calling user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0.user_id
    }

    /// Ensure the caller's role grants `capability`.
    pub fn require(&self, capability: Capability) -> ApiResult<&SessionClaims> {
        if self.0.role.grants(capability) {
            Ok(&self.0)
        } else {
            debug!(user_id = %self.0.user_id, role = %self.0.role, ?capability, "capability denied");
            Err(DomainError::forbidden("insufficient role for this operation"))
        }
    }
}

fn bearer_token(value: Option<&HeaderValue>) -> ApiResult<&str> {
    let value = value.ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;
    let raw = value
        .to_str()
        .map_err(|_| DomainError::unauthorized("malformed authorization header"))?;
    raw.strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| DomainError::unauthorized("authorization header must use the Bearer scheme"))
}

fn http_state(req: &HttpRequest) -> ApiResult<web::Data<HttpState>> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| DomainError::internal("HTTP state is not registered"))
}

fn verify(req: &HttpRequest, state: &HttpState) -> ApiResult<SessionClaims> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "session token rejected");
        DomainError::unauthorized("invalid or expired session token")
    })
}

async fn authenticate(req: HttpRequest) -> ApiResult<Authenticated> {
    let state = http_state(&req)?;
    let mut claims = verify(&req, &state)?;
    let user_id = claims.user_id;
    claims.role = state
        .accounts
        .active_role(user_id)
        .await
        .map_err(|err| match err {
            UserAccountError::NotFound => {
                debug!(%user_id, "token holder is no longer active");
                DomainError::unauthorized("account is no longer active")
            }
            other => other.into(),
        })?;
    Ok(Authenticated(claims))
}

impl FromRequest for Authenticated {
    type Error = DomainError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        Box::pin(authenticate(req.clone()))
    }
}
