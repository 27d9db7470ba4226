// [apps/control-plane/src/middleware.rs]
//! Minimal bearer-token passthrough (`SPEC_FULL.md` §6): authentication,
//! validation and response shaping proper are out of scope (`spec.md`
//! §1), so this only decodes enough of a caller's bearer token to let
//! handlers enforce ownership/role checks, following the teacher's
//! dual-token `auth_guard` shape without its worker-token branch.

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use serde::Deserialize;
use tracing::warn;

/// Identity of the caller making the request, injected as a request
/// extension by `auth_guard`. Handlers compare `user_id` against a
/// resource's owner, or check `is_admin` for admin-only routes.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub user_id: String,
    pub is_admin: bool,
}

impl CallerIdentity {
    pub fn owns_or_admin(&self, resource_owner_id: &str) -> bool {
        self.is_admin || self.user_id == resource_owner_id
    }
}

#[derive(Debug, Deserialize)]
struct BearerClaims {
    sub: String,
    #[serde(default)]
    role: Option<String>,
}

/// Decodes the unverified payload segment of a bearer JWT. Signature
/// verification is out of scope here; a real deployment terminates auth
/// upstream and this layer only recovers identity for ownership checks.
pub async fn auth_guard(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        warn!("rejected bearer token: not a three-segment JWT");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let payload = BASE64_URL.decode(segments[1]).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims: BearerClaims = serde_json::from_slice(&payload).map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(CallerIdentity {
        user_id: claims.sub,
        is_admin: claims.role.as_deref() == Some("administrator"),
    });

    Ok(next.run(request).await)
}

/// Blocks traffic while the gateway client has no usable connection.
pub async fn health_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.db.get_connection().is_err() {
        warn!("health_guard: rejecting request, database unavailable");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response();
    }
    next.run(request).await
}
