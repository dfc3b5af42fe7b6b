#![allow(clippy::needless_for_each)]

use super::handlers::{self, ErrorResponse, ValidationErrors, health, login, register};
use utoipa::OpenApi;

// Info (title, version, description, contact, license) defaults to the Cargo metadata.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::health, handlers::register::register, handlers::login::login),
    components(schemas(
        health::Health,
        register::UserRegister,
        register::Registered,
        login::UserLogin,
        login::LoggedIn,
        ValidationErrors,
        ErrorResponse,
    )),
    tags(
        (name = "accounts", description = "User registration and login"),
        (name = "health", description = "Service and database status")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
