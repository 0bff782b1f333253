use serde::{Deserialize, Serialize};

/// Stored user record. The password submitted on creation is never part of
/// this struct, so it cannot leak into a response.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Partial update payload. `Some` means the field was supplied and overwrites
/// the stored value; `None` means it was absent and stays untouched.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
