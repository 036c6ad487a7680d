use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    http::StatusCode,
};
use tracing::instrument;

use gearlend_core::{AppError, DomainError};

use crate::metrics::track_item_created;
use crate::middleware::role::{CurrentStudent, CurrentTeacher};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::items::model::{
    CreateItemDto, CreateItemForm, ItemFilter, ItemListParams, ItemResponse, UpdateItemDto,
    UploadedImage,
};
use crate::modules::items::service::ItemService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, validate_dto};

fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), anyhow::anyhow!("Invalid multipart form: {}", err.body_text()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Reads the item creation form: `name`, `quantity`, optional `available`
/// and an optional `image` file part. Unknown parts are ignored.
async fn read_item_form(
    mut multipart: Multipart,
) -> Result<(CreateItemDto, Option<UploadedImage>), AppError> {
    let mut name = None;
    let mut quantity = None;
    let mut available = true;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await.map_err(multipart_error)?.trim().to_string());
            }
            Some("quantity") => {
                let raw = field.text().await.map_err(multipart_error)?;
                let parsed = raw.trim().parse::<i64>().map_err(|_| {
                    DomainError::validation("quantity", "Quantity must be a whole number")
                })?;
                quantity = Some(parsed);
            }
            Some("available") => {
                let raw = field.text().await.map_err(multipart_error)?;
                available = parse_bool(&raw).ok_or_else(|| {
                    DomainError::validation("available", "Available must be true or false")
                })?;
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !filename.is_empty() && !bytes.is_empty() {
                    image = Some(UploadedImage {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let name = name
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("name is required")))?;
    let quantity = quantity
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("quantity is required")))?;

    Ok((
        CreateItemDto {
            name,
            quantity,
            available,
        },
        image,
    ))
}

#[utoipa::path(
    post,
    path = "/teacher/items",
    request_body(content = CreateItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Missing form field", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 415, description = "Unsupported image type", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, teacher, multipart), fields(teacher_id = teacher.id))]
pub async fn create_item(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let (dto, image) = read_item_form(multipart).await?;
    validate_dto(&dto)?;

    let item = ItemService::create_item(&state.db, &state.storage, teacher.id, dto, image).await?;
    track_item_created();

    Ok((
        StatusCode::CREATED,
        Json(ItemService::to_response(&state.storage, item)),
    ))
}

#[utoipa::path(
    get,
    path = "/teacher/items",
    params(ItemListParams),
    responses(
        (status = 200, description = "Items ordered by id", body = Vec<ItemResponse>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_items(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Query(params): Query<ItemListParams>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = ItemService::list_items(&state.db, params.filter.unwrap_or_default()).await?;
    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemService::to_response(&state.storage, item))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/teacher/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _teacher))]
pub async fn get_item(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = ItemService::get_item(&state.db, id).await?;
    Ok(Json(ItemService::to_response(&state.storage, item)))
}

#[utoipa::path(
    put,
    path = "/teacher/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _teacher, dto))]
pub async fn update_item(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateItemDto>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = ItemService::update_item(&state.db, id, dto).await?;
    Ok(Json(ItemService::to_response(&state.storage, item)))
}

#[utoipa::path(
    delete,
    path = "/teacher/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item and its image deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Item has loan records", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_item(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ItemService::delete_item(&state.db, &state.storage, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/student/items/available",
    responses(
        (status = 200, description = "Items that can be borrowed now", body = Vec<ItemResponse>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _student))]
pub async fn get_available_items(
    State(state): State<AppState>,
    _student: CurrentStudent,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = ItemService::list_items(&state.db, ItemFilter::Available).await?;
    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemService::to_response(&state.storage, item))
            .collect(),
    ))
}
