use auth::VerifyError;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const NO_TOKEN: &str = "No token provided.";
const BAD_TOKEN: &str = "Failed to authenticate token.";

/// Middleware that verifies the session token and adds the identity claim
/// to request extensions.
///
/// A missing token is rejected with 403, an unusable one with 401.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claim = state
        .authenticator
        .verify_token(token.as_deref())
        .map_err(|e| match e {
            VerifyError::MissingToken => ApiError::Forbidden(NO_TOKEN.to_string()).into_response(),
            other => {
                tracing::warn!(error = %other, "Token verification failed");
                ApiError::Unauthorized(BAD_TOKEN.to_string()).into_response()
            }
        })?;

    tracing::debug!(role = %claim.role, "Request authorized");
    req.extensions_mut().insert(claim);

    Ok(next.run(req).await)
}

/// The header carries the raw token; a `Bearer ` prefix is tolerated.
fn extract_token_from_header(req: &Request) -> Result<Option<String>, Response> {
    let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid UTF-8");
        ApiError::Unauthorized(BAD_TOKEN.to_string()).into_response()
    })?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    Ok(Some(token.to_string()))
}
