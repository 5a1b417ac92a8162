use std::collections::HashMap;

use axum::async_trait;
use axum::extract::FromRequest;
use axum::extract::Multipart;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use axum::Json;
use serde_json::Value;

use crate::domain::account::models::ImageUpload;
use crate::inbound::http::handlers::ApiError;

/// Multipart field carrying the profile image.
pub const PROFILE_IMAGE_FIELD: &str = "profileImage";

/// Text fields plus optional image, from JSON, urlencoded or multipart bodies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    fields: HashMap<String, String>,
    pub profile_image: Option<ImageUpload>,
}

impl ProfileForm {
    /// Get a text field, treating blank values as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn with_field(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    fn from_json(object: serde_json::Map<String, Value>) -> Self {
        let fields = object
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(s) => Some((name, s)),
                Value::Number(n) => Some((name, n.to_string())),
                Value::Bool(b) => Some((name, b.to_string())),
                _ => None,
            })
            .collect();

        Self {
            fields,
            profile_image: None,
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ProfileForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == PROFILE_IMAGE_FIELD {
                let original_file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;

                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.profile_image = Some(ImageUpload {
                        original_file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type.as_deref() {
            None => Ok(ProfileForm::default()),
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                ProfileForm::from_multipart(multipart).await
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                Ok(ProfileForm {
                    fields,
                    profile_image: None,
                })
            }
            Some(_) => {
                let Json(object) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                Ok(ProfileForm::from_json(object))
            }
        }
    }
}
