use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Authenticated principal extracted from a verified bearer token. Inserted
/// into request extensions by the auth middleware and threaded into the
/// ownership guard and create handler explicitly.
#[derive(Clone, Debug)]
pub struct Principal {
    pub id: String,
}

impl From<auth::Claims> for Principal {
    fn from(claims: auth::Claims) -> Self {
        Self { id: claims.sub }
    }
}

/// Bearer authentication middleware. Every /cats route passes through here
/// before any other stage runs; there is no anonymous access to the resource.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract bearer token from Authorization header
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    // Delegate to the credential verifier
    let claims = auth::verify_jwt(&token).map_err(|e| ApiError::unauthorized(e.to_string()))?;

    // Bind the resolved principal to the request for downstream handlers
    let principal = Principal::from(claims);
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
