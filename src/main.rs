mod api;
mod middleware;
mod models;
mod services;
mod store;
mod utils;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::auth_service::{StaticTokenVerifier, TokenVerifier};
use crate::store::UserStore;
use crate::utils::error::AppError;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());

    log::info!("🚀 Starting User Service...");

    // Shared in-memory store; lives exactly as long as the process.
    let store = web::Data::new(UserStore::new());

    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::from_env());

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            // Malformed request bodies surface as 422, same as the
            // field-constraint errors.
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Users CRUD - bearer token required, mutations admin-only
            .service(
                web::scope("/api/users")
                    .wrap(middleware::auth::AuthMiddleware::new(verifier.clone()))
                    .route("", web::get().to(api::users::list_users))
                    .route("", web::post().to(api::users::create_user))
                    .route("/{id}", web::get().to(api::users::get_user))
                    .route("/{id}", web::put().to(api::users::update_user))
                    .route("/{id}", web::delete().to(api::users::delete_user)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
