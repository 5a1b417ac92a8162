use auth::Role;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        // Without a JSON content type the body carries no fields.
        Err(JsonRejection::MissingJsonContentType(_)) => LoginRequest::default(),
        Err(rejection) => return Err(ApiError::from(rejection)),
    };
    let command = body.try_into_command()?;

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, AuthResponseData::new(session.token)))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: Option<String>,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let role = self
            .role
            .as_deref()
            .and_then(|role| role.parse::<Role>().ok())
            .ok_or_else(|| ApiError::BadRequest("Invalid role specified.".to_string()))?;

        // An address that cannot exist cannot match an account.
        let email = EmailAddress::new(self.email)
            .map_err(|_| ApiError::from(AccountError::NotFound(role.to_string())))?;

        let password = Password::new(self.password)
            .map_err(|_| ApiError::from(AccountError::InvalidCredentials))?;

        Ok(LoginCommand {
            role,
            email,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, role: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("a@example.com", "secret123", Some("admin"))
            .try_into_command()
            .unwrap();
        assert_eq!(command.role, Role::Admin);
        assert_eq!(command.email.as_str(), "a@example.com");
    }

    #[test]
    fn test_missing_or_unknown_role() {
        let expected = ApiError::BadRequest("Invalid role specified.".to_string());
        assert_eq!(
            request("a@example.com", "x", None).try_into_command().unwrap_err(),
            expected
        );
        assert_eq!(
            request("a@example.com", "x", Some("root"))
                .try_into_command()
                .unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_invalid_email_is_not_found() {
        assert_eq!(
            request("nope", "x", Some("user")).try_into_command().unwrap_err(),
            ApiError::NotFound("user not found.".to_string())
        );
    }

    #[test]
    fn test_empty_password_is_unauthorized() {
        assert_eq!(
            request("a@example.com", "", Some("user"))
                .try_into_command()
                .unwrap_err(),
            ApiError::Unauthorized("Invalid password.".to_string())
        );
    }

    #[test]
    fn test_empty_request_is_invalid_role() {
        assert_eq!(
            LoginRequest::default().try_into_command().unwrap_err(),
            ApiError::BadRequest("Invalid role specified.".to_string())
        );
    }

    #[test]
    fn test_body_fields_default() {
        let body: LoginRequest = serde_json::from_str(r#"{"role":"user"}"#).unwrap();
        assert_eq!(body, request("", "", Some("user")));
    }
}
