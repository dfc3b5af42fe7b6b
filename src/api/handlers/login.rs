use crate::{
    api::handlers::{
        ErrorResponse, MSG_INVALID_CREDENTIALS, MSG_INVALID_PAYLOAD, has_null_characters,
    },
    store::UserStore,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct UserLogin {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl std::fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoggedIn {
    pub success: bool,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", body = LoggedIn, content_type = "application/json"),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag= "accounts"
)]
// axum handler for login
#[instrument(skip(store))]
pub async fn login(
    store: Extension<Arc<dyn UserStore>>,
    payload: Option<Json<UserLogin>>,
) -> Response {
    let user: UserLogin = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(MSG_INVALID_PAYLOAD)),
            )
                .into_response();
        }
    };

    // absent fields can never match a stored row
    let (Some(email), Some(password)) = (user.email.as_deref(), user.password.as_deref()) else {
        debug!("Missing credentials");
        return unauthorized();
    };

    // NUL cannot be stored, so it can never match either
    if has_null_characters(email) || has_null_characters(password) {
        debug!("Credentials contain null characters");
        return unauthorized();
    }

    match store.find_by_credentials(email, password).await {
        Ok(Some(user)) => {
            debug!(user.id = user.id, "Login successful");
            (StatusCode::OK, Json(LoggedIn { success: true })).into_response()
        }
        Ok(None) => {
            debug!("Unauthorized");
            unauthorized()
        }
        Err(e) => {
            error!("Error looking up credentials: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error looking up credentials")),
            )
                .into_response()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(MSG_INVALID_CREDENTIALS)),
    )
        .into_response()
}
