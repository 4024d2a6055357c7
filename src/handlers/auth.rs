use crate::error::{AppError, AppResult};
use crate::models::UserModel;
use crate::response::ApiResponse;
use crate::services::auth::AuthService;
use crate::services::google::GoogleTokenVerifier;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One endpoint, two body shapes: plain credentials, or a Google identity
/// token discriminated by `isGoogleSignIn`. The Google variant is tried
/// first, matching the original API's precedence.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SignupRequest {
    Google(GoogleSignupRequest),
    Plain(PlainSignupRequest),
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlainSignupRequest {
    /// Display name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Password
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignupRequest {
    /// Discriminant for the Google path
    pub is_google_sign_in: bool,
    /// Google-issued ID token
    pub token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupUserResponse {
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
}

impl From<UserModel> for SignupUserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            full_name: user.full_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Session token, valid for one hour
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupUserResponse),
        (status = 200, description = "Google Sign-In successful", body = SignupUserResponse),
        (status = 400, description = "Missing fields or Google sign-in unavailable", body = AppError),
        (status = 401, description = "Invalid Google token", body = AppError),
        (status = 409, description = "Email already registered", body = AppError),
    ),
    tag = "auth"
)]
pub async fn signup(
    Extension(db): Extension<DatabaseConnection>,
    verifier: Option<Extension<GoogleTokenVerifier>>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Response> {
    let service = AuthService::new(db);

    match payload {
        SignupRequest::Plain(req) => {
            req.validate()
                .map_err(|e| AppError::Validation(e.to_string()))?;

            let user = service
                .signup(&req.full_name, &req.email, &req.password)
                .await?;

            Ok((
                StatusCode::CREATED,
                ApiResponse::with_message(
                    SignupUserResponse::from(user),
                    "Signup successful".to_string(),
                ),
            )
                .into_response())
        }
        SignupRequest::Google(req) => {
            if !req.is_google_sign_in {
                return Err(AppError::Validation(
                    "isGoogleSignIn must be true for Google sign-in".to_string(),
                ));
            }

            let Extension(verifier) = verifier.ok_or_else(|| {
                AppError::Validation("Google sign-in is not configured".to_string())
            })?;

            let claims = verifier.verify(&req.token).await?;
            let user = service.google_sign_in(&claims).await?;

            Ok(ApiResponse::with_message(
                SignupUserResponse::from(user),
                "Google Sign-In successful".to_string(),
            )
            .into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid email or password", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    let token = service.login(&payload.email, &payload.password).await?;

    Ok(ApiResponse::with_message(
        LoginResponse { token },
        "Login successful".to_string(),
    ))
}
