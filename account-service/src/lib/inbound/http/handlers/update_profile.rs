use auth::IdentityClaim;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::UpdateProfileCommand;
use crate::inbound::http::form::ProfileForm;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    form: ProfileForm,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let command = parse_update_form(form)?;

    state
        .account_service
        .update_profile(&claim, command)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Profile updated successfully."),
            )
        })
}

fn parse_update_form(form: ProfileForm) -> Result<UpdateProfileCommand, ApiError> {
    let name = form
        .text("name")
        .map(|name| DisplayName::new(name.to_string()))
        .transpose()
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid name: {}", e)))?;

    Ok(UpdateProfileCommand {
        name,
        profile_image: form.profile_image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_changes_nothing() {
        let command = parse_update_form(ProfileForm::default()).unwrap();
        assert!(command.name.is_none());
        assert!(command.profile_image.is_none());
    }

    #[test]
    fn test_name_is_validated() {
        let command = parse_update_form(ProfileForm::default().with_field("name", " Ada ")).unwrap();
        assert_eq!(command.name.unwrap().as_str(), "Ada");

        let err = parse_update_form(ProfileForm::default().with_field("name", "x".repeat(101)))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));
    }
}
