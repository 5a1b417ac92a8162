use auth::IdentityClaim;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .account_service
        .delete_profile(&claim)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Account deleted successfully."),
            )
        })
}
