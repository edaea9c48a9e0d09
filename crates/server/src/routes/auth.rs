//! Authentication handlers: register, login, current admin.

use axum::{Json, Router, extract::State, routing::{get, post}};
use serde::{Deserialize, Serialize};

use kuber_core::{AdminId, Email};

use crate::{
    db::{AdminRepository, admins::NewAdmin},
    error::AppError,
    middleware::RequireAdminAuth,
    models::Admin,
    services::auth,
    state::AppState,
};

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "admin".to_string()
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email: Email,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: token plus the admin minus credential and timestamp.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminSummary,
}

/// The admin object embedded in the login response.
#[derive(Debug, Serialize)]
pub struct AdminSummary {
    pub id: AdminId,
    pub email: Email,
    pub name: String,
    pub role: String,
}

impl From<Admin> for AdminSummary {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
        }
    }
}

/// Register a new admin account.
///
/// # Errors
///
/// Returns 400 if the email is malformed or already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let email = Email::parse(&body.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let repo = AdminRepository::new(state.pool());
    if repo.find_by_email(email.as_str()).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&body.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    let admin = repo
        .create(&NewAdmin {
            email: &email,
            password_hash: &password_hash,
            name: &body.name,
            role: &body.role,
        })
        .await?;

    Ok(Json(RegisterResponse {
        message: "Admin registered successfully".to_string(),
        email: admin.email,
    }))
}

/// Log in with email and password.
///
/// # Errors
///
/// Returns 401 on any mismatch. The response never reveals whether the
/// email exists: unknown email and wrong password answer identically.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let credentials = AdminRepository::new(state.pool())
        .credentials_by_email(&body.email)
        .await?
        .ok_or_else(invalid)?;

    if !auth::verify_password(&body.password, &credentials.password_hash) {
        return Err(invalid());
    }

    let token = auth::mint_token(&state.config().jwt_secret, &credentials.admin.email)
        .map_err(|_| AppError::Internal("token minting failed".to_string()))?;

    Ok(Json(LoginResponse {
        token,
        admin: credentials.admin.into(),
    }))
}

/// Return the authenticated admin's record.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<Admin> {
    Json(admin)
}
