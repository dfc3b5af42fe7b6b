use crate::{
    api::handlers::{
        ErrorResponse, MSG_DUPLICATE_EMAIL, MSG_INVALID_PAYLOAD, ValidationErrors, check_email,
        check_password,
    },
    store::{StoreError, UserStore},
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Default)]
pub struct UserRegister {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Registered {
    pub message: String,
}

#[utoipa::path(
    post,
    path= "/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = Registered, content_type = "application/json"),
        (status = 400, description = "Invalid or already registered email, missing password", body = ValidationErrors),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag= "accounts"
)]
// axum handler for register
#[instrument(skip(store))]
pub async fn register(
    store: Extension<Arc<dyn UserStore>>,
    payload: Option<Json<UserRegister>>,
) -> Response {
    let user: UserRegister = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrors::single(
                    "non_field_errors",
                    MSG_INVALID_PAYLOAD,
                )),
            )
                .into_response();
        }
    };

    let mut errors = ValidationErrors::new();
    let email = check_email(&mut errors, user.email.as_deref());
    let password = check_password(&mut errors, user.password.as_deref());

    // uniqueness is only checked for an email that passed every field rule
    if let Some(email) = email {
        match store.exists(email).await {
            Ok(true) => {
                debug!("User already exists");
                errors.add("email", MSG_DUPLICATE_EMAIL);
            }
            Ok(false) => (),
            Err(e) => {
                error!("Error checking if user exists: {}", e);
                return internal_error("Error checking if user exists");
            }
        }
    }

    let (Some(email), Some(password), true) = (email, password, errors.is_empty()) else {
        debug!("Validation failed: {:?}", errors);
        return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
    };

    match store.insert(email, password).await {
        Ok(user) => {
            info!(user.id = user.id, "User registered");
            (
                StatusCode::CREATED,
                Json(Registered {
                    message: "User registered successfully!".to_string(),
                }),
            )
                .into_response()
        }
        // lost a race against a concurrent registration
        Err(StoreError::Duplicate) => {
            debug!("User already exists (unique constraint)");
            duplicate_email()
        }
        Err(e) => {
            error!("Error inserting user: {}", e);
            internal_error("Error inserting user")
        }
    }
}

fn duplicate_email() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrors::single("email", MSG_DUPLICATE_EMAIL)),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}
