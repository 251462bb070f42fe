use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::application::{CreateDomain, UpdateDomain};
use crate::domain::{DomainError, StoredFile, UploadedFile};

/// Text fields and files decoded from a `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct DomainForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub file: Option<UploadedFile>,
    pub image: Option<UploadedFile>,
}

impl DomainForm {
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, DomainError> {
        let mut multipart = multipart
            .map_err(|e| DomainError::validation(format!("Expected a multipart form: {e}")))?;
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| DomainError::validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "file" | "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        DomainError::validation(format!("Failed to read {name}: {e}"))
                    })?;

                    // Browsers send an empty part for an untouched file input.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    if file_name.is_empty() {
                        return Err(DomainError::validation(format!(
                            "{name} must be sent as a file upload"
                        )));
                    }

                    let slot = if name == "file" {
                        &mut form.file
                    } else {
                        &mut form.image
                    };
                    if slot.is_some() {
                        return Err(DomainError::validation(format!(
                            "Only one {name} may be uploaded"
                        )));
                    }
                    *slot = Some(UploadedFile::new(file_name, bytes.to_vec()));
                }
                "id" | "title" | "url" | "description" => {
                    let text = field.text().await.map_err(|e| {
                        DomainError::validation(format!("Failed to read {name}: {e}"))
                    })?;
                    let slot = match name.as_str() {
                        "id" => &mut form.id,
                        "title" => &mut form.title,
                        "url" => &mut form.url,
                        _ => &mut form.description,
                    };
                    *slot = Some(text);
                }
                _ => tracing::debug!(field = %name, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

impl From<DomainForm> for CreateDomain {
    fn from(form: DomainForm) -> Self {
        Self {
            title: form.title,
            url: form.url,
            description: form.description,
            mapper_file: form.file,
            image_file: form.image,
        }
    }
}

impl From<DomainForm> for UpdateDomain {
    fn from(form: DomainForm) -> Self {
        Self {
            id: form.id,
            title: form.title,
            url: form.url,
            description: form.description,
            mapper_file: form.file,
            image_file: form.image,
        }
    }
}

pub async fn create_domain(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, DomainError> {
    let form = DomainForm::read(multipart).await?;
    let domain = state.manager.create(form.into()).await?;

    Ok(Json(
        ApiResponse::success()
            .with_message("Domain created successfully")
            .with_domain(domain),
    ))
}

pub async fn get_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, DomainError> {
    let domain = state.manager.get(&id).await?;
    Ok(Json(ApiResponse::success().with_domain(domain)))
}

pub async fn get_all_domains(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse>, DomainError> {
    let domains = state.manager.list().await?;
    Ok(Json(ApiResponse::success().with_domains(domains)))
}

pub async fn update_domain(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, DomainError> {
    let form = DomainForm::read(multipart).await?;
    let domain = state.manager.update(form.into()).await?;

    Ok(Json(
        ApiResponse::success()
            .with_message("Domain updated successfully")
            .with_domain(domain),
    ))
}

pub async fn delete_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, DomainError> {
    state.manager.delete(&id).await?;
    Ok(Json(
        ApiResponse::success().with_message("Domain deleted successfully"),
    ))
}

pub async fn download_mapper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DomainError> {
    let file = state.manager.mapper_file(&id).await?;
    Ok(file_response(file, "attachment"))
}

pub async fn render_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DomainError> {
    let file = state.manager.image_file(&id).await?;
    Ok(file_response(file, "inline"))
}

fn file_response(file: StoredFile, disposition: &'static str) -> Response {
    let content_type = HeaderValue::from_str(&file.content_type())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let content_disposition = HeaderValue::from_str(&format!(
        "{disposition}; filename=\"{}\"",
        file.file_name.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(disposition));

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        file.bytes,
    )
        .into_response()
}
