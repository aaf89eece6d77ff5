use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{Profile, ProfileUpdate},
        Error, User,
    },
    AppState,
};

/// Defines the OpenAPI spec for profile endpoints
#[derive(OpenApi)]
#[openapi(paths(
    update_vulnerable_handler,
    update_safe_handler,
    update_scoped_handler,
    get_profile_handler,
    list_profiles_handler
))]
pub struct ProfileApi;

/// Used to group profile endpoints together in the OpenAPI documentation
pub const PROFILE_API_GROUP: &str = "PROFILE";

/// Builds a router for the profile routes
pub fn profile_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(list_profiles_handler))
        .route("/profile/update_vulnerable", post(update_vulnerable_handler))
        .route("/profile/update_safe/:id", post(update_safe_handler))
        .route("/profile/update_scoped/:id", post(update_scoped_handler))
        .route("/profile/:id", get(get_profile_handler))
}

fn user_not_found(id: i64) -> Error {
    warn!(id, "Unknown user requested");
    Error::not_found(format!("User not found: {}", id))
}

/// Binds every form field (`id` and `role` included) onto a `User` and saves it as is.
///
/// This is the mass-assignment hole: any caller can pick the role of any user.
#[utoipa::path(
    post,
    path = "/profile/update_vulnerable",
    tag = PROFILE_API_GROUP,
    request_body(content = User, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User saved verbatim", body = String, content_type = "text/plain"),
    )
)]
pub async fn update_vulnerable_handler(
    State(state): State<Arc<AppState>>,
    Form(user): Form<User>,
) -> Result<String, Error> {
    let saved = state.db.save_user(&user).await?;
    let id = saved.id.unwrap_or_default();
    warn!(id, role = ?saved.role, "Saved request-bound user without filtering");
    Ok(format!("Vulnerable update complete. Check stored user: {}", id))
}

/// Loads the user, copies over the sanitized `username`/`email` and saves it back.
/// `id` and `role` in the body are ignored.
#[utoipa::path(
    post,
    path = "/profile/update_safe/{id}",
    tag = PROFILE_API_GROUP,
    request_body(content = ProfileUpdate, content_type = "application/x-www-form-urlencoded"),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile fields updated", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
    )
)]
pub async fn update_safe_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(body): Form<ProfileUpdate>,
) -> Result<String, Error> {
    let mut user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    body.sanitized().apply_to(&mut user);
    state.db.save_user(&user).await?;

    info!(id, "Updated profile fields");
    Ok(format!("Safe update complete. Check stored user: {}", id))
}

/// Same policy as `update_safe`, done as one column-scoped `UPDATE` instead of
/// a load followed by a full save, so concurrent writers cannot lose each other's changes.
#[utoipa::path(
    post,
    path = "/profile/update_scoped/{id}",
    tag = PROFILE_API_GROUP,
    request_body(content = ProfileUpdate, content_type = "application/x-www-form-urlencoded"),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile fields updated", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
    )
)]
pub async fn update_scoped_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(body): Form<ProfileUpdate>,
) -> Result<String, Error> {
    let body = body.sanitized();
    state
        .db
        .update_user_profile(id, body.username.as_deref(), body.email.as_deref())
        .await?
        .ok_or_else(|| user_not_found(id))?;

    info!(id, "Updated profile fields in place");
    Ok(format!("Safe update complete. Check stored user: {}", id))
}

#[utoipa::path(
    get,
    path = "/profile/{id}",
    tag = PROFILE_API_GROUP,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Stored user", body = Profile),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Profile>, Error> {
    let user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(Profile::from(user)))
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = PROFILE_API_GROUP,
    responses(
        (status = 200, description = "All stored users", body = [Profile]),
    )
)]
pub async fn list_profiles_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Profile>>, Error> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(Profile::from).collect()))
}
