use actix_web::{web, HttpResponse};

use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::auth_service::{self, Identity};
use crate::services::user_service;
use crate::store::UserStore;
use crate::utils::error::AppError;

/// GET /api/users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records", body = [User]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    identity: web::ReqData<Identity>,
    store: web::Data<UserStore>,
) -> HttpResponse {
    log::info!("📋 GET /api/users - caller {}", identity.id);

    let users = user_service::list_users(&store);

    log::info!("✅ Listed {} users", users.len());
    HttpResponse::Ok().json(users)
}

/// GET /api/users/{id} - Busca usuário específico
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    identity: web::ReqData<Identity>,
    store: web::Data<UserStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    log::info!("🔍 GET /api/users/{} - caller {}", user_id, identity.id);

    let user = user_service::get_user(&store, user_id)?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /api/users - Cria novo usuário (admin)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 422, description = "Field constraints violated")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_user(
    identity: web::ReqData<Identity>,
    store: web::Data<UserStore>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    auth_service::require_admin(&identity)?;

    log::info!("📝 POST /api/users - creating '{}'", request.name);

    let user = user_service::create_user(&store, request.into_inner())?;

    log::info!("✅ User created: id={}", user.id);
    Ok(HttpResponse::Created().json(user))
}

/// PUT /api/users/{id} - Atualização parcial (admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Merged user record", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Field constraints violated")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    identity: web::ReqData<Identity>,
    store: web::Data<UserStore>,
    path: web::Path<u64>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    auth_service::require_admin(&identity)?;

    let user_id = path.into_inner();
    log::info!("🔧 PUT /api/users/{} - merging fields", user_id);

    let user = user_service::update_user(&store, user_id, request.into_inner())?;

    log::info!("✅ User updated: id={}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /api/users/{id} - Remove usuário (admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted, empty body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    identity: web::ReqData<Identity>,
    store: web::Data<UserStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    auth_service::require_admin(&identity)?;

    let user_id = path.into_inner();
    log::info!("🗑️  DELETE /api/users/{}", user_id);

    user_service::delete_user(&store, user_id)?;

    log::info!("✅ User deleted: id={}", user_id);
    Ok(HttpResponse::NoContent().finish())
}
