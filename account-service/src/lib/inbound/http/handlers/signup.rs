use axum::extract::State;
use axum::http::StatusCode;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordError;
use crate::account::errors::PhoneError;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::SignupCommand;
use crate::inbound::http::form::ProfileForm;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    form: ProfileForm,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let command = parse_signup_form(form)?;

    state
        .account_service
        .signup(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, AuthResponseData::new(session.token)))
}

#[derive(Debug, Clone, Error)]
enum ParseSignupFormError {
    #[error("Please provide at least one of email or phone.")]
    MissingContact,

    #[error("Please provide all the required fields")]
    MissingFields,

    #[error("Invalid role specified.")]
    Role(#[from] auth::RoleError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    Phone(#[from] PhoneError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

fn parse_signup_form(form: ProfileForm) -> Result<SignupCommand, ParseSignupFormError> {
    let email = form.text("email");
    let phone = form.text("phone");

    if email.is_none() && phone.is_none() {
        return Err(ParseSignupFormError::MissingContact);
    }

    let (Some(email), Some(phone), Some(name), Some(password)) =
        (email, phone, form.text("name"), form.text("password"))
    else {
        return Err(ParseSignupFormError::MissingFields);
    };

    // Role is optional on signup and defaults to a regular user.
    let role = match form.text("role") {
        Some(role) => role.parse()?,
        None => auth::Role::User,
    };

    Ok(SignupCommand {
        role,
        email: EmailAddress::new(email.to_string())?,
        phone: PhoneNumber::new(phone.to_string())?,
        name: DisplayName::new(name.to_string())?,
        password: Password::new(password.to_string())?,
        profile_image: form.profile_image,
    })
}

impl From<ParseSignupFormError> for ApiError {
    fn from(err: ParseSignupFormError) -> Self {
        match err {
            ParseSignupFormError::MissingContact
            | ParseSignupFormError::MissingFields
            | ParseSignupFormError::Role(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::UnprocessableEntity(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;

    use super::*;

    fn complete_form() -> ProfileForm {
        ProfileForm::default()
            .with_field("email", "a@example.com")
            .with_field("phone", "555-0100")
            .with_field("name", "Ada")
            .with_field("password", "secret123")
    }

    #[test]
    fn test_complete_form_defaults_to_user() {
        let command = parse_signup_form(complete_form()).unwrap();
        assert_eq!(command.role, Role::User);
        assert_eq!(command.email.as_str(), "a@example.com");
        assert_eq!(command.password.expose(), "secret123");
        assert!(command.profile_image.is_none());
    }

    #[test]
    fn test_admin_role() {
        let command = parse_signup_form(complete_form().with_field("role", "admin")).unwrap();
        assert_eq!(command.role, Role::Admin);
    }

    #[test]
    fn test_no_contact_is_bad_request() {
        let form = ProfileForm::default()
            .with_field("name", "Ada")
            .with_field("password", "secret123");

        assert_eq!(
            ApiError::from(parse_signup_form(form).unwrap_err()),
            ApiError::BadRequest("Please provide at least one of email or phone.".to_string())
        );
    }

    #[test]
    fn test_missing_password_is_bad_request() {
        let form = ProfileForm::default()
            .with_field("email", "a@example.com")
            .with_field("phone", "555-0100")
            .with_field("name", "Ada")
            .with_field("password", "  ");

        assert_eq!(
            ApiError::from(parse_signup_form(form).unwrap_err()),
            ApiError::BadRequest("Please provide all the required fields".to_string())
        );
    }

    #[test]
    fn test_unknown_role_is_bad_request() {
        let err = parse_signup_form(complete_form().with_field("role", "root")).unwrap_err();
        assert_eq!(
            ApiError::from(err),
            ApiError::BadRequest("Invalid role specified.".to_string())
        );
    }

    #[test]
    fn test_invalid_email_is_unprocessable() {
        let err = parse_signup_form(complete_form().with_field("email", "nope")).unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::UnprocessableEntity(_)));
    }
}
