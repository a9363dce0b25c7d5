use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use menugen_shared::constants::{FIELD_IMAGE, FIELD_OPENAI_KEY};
use menugen_shared::{MenuResult, UploadPolicy};
use tracing::{debug, info};

use crate::auth::CurrentIdentity;
use crate::models::MenuImage;
use crate::security::upload::{read_image_field, stream_error, NO_IMAGE};
use crate::services::{MenuService, OpenAiClient};
use crate::state::AppState;
use crate::utils::error::ApiError;

/// Parsed `multipart/form-data` body of a menu upload.
pub struct MenuUpload {
    pub image: MenuImage,
    pub credential: String,
}

/// POST /api/process-menu
pub async fn process_menu(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MenuResult>, ApiError> {
    if state.settings.auth.enforce && identity.is_none() {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    }

    let user = identity.as_ref().map(|i| i.id.as_str()).unwrap_or("anonymous");
    info!("Menu processing request received from {}", user);

    let upload = read_menu_upload(multipart, &state.settings.upload).await?;

    let models = OpenAiClient::new(
        state.http.clone(),
        state.settings.openai.clone(),
        upload.credential,
    );
    let service = MenuService::new(Box::new(models));
    let result = service.process(&upload.image).await?;

    info!("Returning {} menu items to {}", result.items.len(), user);
    Ok(Json(result))
}

pub async fn read_menu_upload(
    multipart: Result<Multipart, MultipartRejection>,
    policy: &UploadPolicy,
) -> Result<MenuUpload, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request body is not a multipart form: {}", e);
        ApiError::BadRequest(NO_IMAGE.to_string())
    })?;

    let mut image: Option<MenuImage> = None;
    let mut credential: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| stream_error(e, policy, 0))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            FIELD_IMAGE => {
                image = Some(read_image_field(field, policy).await?);
            }
            FIELD_OPENAI_KEY => {
                credential = Some(field.text().await.map_err(|e| stream_error(e, policy, 0))?);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest(NO_IMAGE.to_string()))?;
    let credential = credential
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ApiError::BadRequest("OpenAI API key is required".to_string()))?;

    Ok(MenuUpload { image, credential })
}
