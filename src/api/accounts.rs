//! Registration and login handlers.

use actix_web::{post, web, HttpResponse};

use crate::application::Services;

use super::dto::{CredentialsRequest, LoginResponse, RegisterResponse};
use super::error::{ApiError, ApiResult};

/// Create an account. Answers 201 with the new user's id.
#[post("/register")]
pub async fn register(
    services: web::Data<Services>,
    body: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, senha } = body.into_inner();

    let user_id = services
        .accounts
        .register(
            email.as_deref().unwrap_or_default(),
            senha.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to register user"))?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// Check credentials. Answers 200 with the user's id, which the client keeps
/// and sends back on ledger calls.
#[post("/login")]
pub async fn login(
    services: web::Data<Services>,
    body: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { email, senha } = body.into_inner();

    let usuario_id = services
        .accounts
        .login(
            email.as_deref().unwrap_or_default(),
            senha.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to log in"))?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Logged in successfully".to_string(),
        usuario_id,
    }))
}
