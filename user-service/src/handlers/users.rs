//! User CRUD endpoints. Each handler makes exactly one store call.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::HeaderMap,
    Json,
};

use crate::{
    dtos::{CreateUserRequest, UpdateUserRequest, UserResponse},
    error::UserError,
    handlers::request_url,
    models::{InvalidUserId, NewUser, UserId, UserPatch},
    startup::AppState,
};

pub const USER_ADDED: &str = "User added successfully";
pub const USER_DELETED: &str = "User deleted successfully";
pub const USER_UPDATED: &str = "User updated successfully";

fn unpack_body<T>(
    body: Result<Json<T>, JsonRejection>,
    headers: &HeaderMap,
    uri: &axum::http::Uri,
) -> Result<T, UserError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| UserError::MalformedBody {
            url: request_url(headers, uri),
            reason: rejection.body_text(),
        })
}

/// A path segment that is not valid UTF-8 is reported like any other malformed id.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<UserId, UserError> {
    let Path(raw) = path.map_err(|rejection| InvalidUserId(rejection.body_text()))?;
    Ok(raw.parse()?)
}

/// POST /add
#[tracing::instrument(skip_all)]
pub async fn add_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<&'static str>, UserError> {
    let payload = unpack_body(body, &headers, &uri)?;
    let new_user = NewUser::try_from(payload).map_err(|_| UserError::MissingFields {
        url: request_url(&headers, &uri),
    })?;

    let id = state.store.insert(new_user).await?;
    tracing::info!(user_id = %id, "User added");

    Ok(Json(USER_ADDED))
}

/// GET /users
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, UserError> {
    let users = state.store.find_all().await?;
    tracing::debug!(count = users.len(), "Listed users");

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /user/:id
#[tracing::instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserResponse>, UserError> {
    let id = parse_id(path)?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(UserError::UserNotFound)?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /delete/:id
#[tracing::instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<&'static str>, UserError> {
    let id = parse_id(path)?;

    if !state.store.delete_by_id(id).await? {
        return Err(UserError::UserNotFound);
    }
    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(USER_DELETED))
}

/// PUT /update/:id
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<&'static str>, UserError> {
    let id = parse_id(path)?;
    let patch = UserPatch::from(unpack_body(body, &headers, &uri)?);

    if patch.is_empty() {
        return Err(UserError::NoChange);
    }

    let outcome = state.store.update_by_id(id, &patch).await?;
    if !outcome.matched {
        return Err(UserError::UserNotFound);
    }
    if !outcome.modified {
        return Err(UserError::NoChange);
    }
    tracing::info!(user_id = %id, "User updated");

    Ok(Json(USER_UPDATED))
}
