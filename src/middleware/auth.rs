use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::api::metrics;
use crate::services::auth_service::TokenVerifier;
use crate::utils::error::AppError;

/// Bearer-token gate for protected scopes.
///
/// On success the verified [`Identity`](crate::services::auth_service::Identity)
/// is inserted into the request extensions, where handlers pick it up via
/// `web::ReqData<Identity>`. Rejections short-circuit with a 401 response
/// and never reach the wrapped service.
pub struct AuthMiddleware {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthMiddleware {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        AuthMiddleware { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc because the verifier call is async and the service handle must move
    // into the boxed future.
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        metrics::increment_request_count();

        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let header = match auth_header {
                Some(header) => header,
                None => return Ok(reject(req, "Missing authorization token")),
            };

            let token = match header.strip_prefix("Bearer ") {
                Some(token) => token,
                None => return Ok(reject(req, "Invalid token format")),
            };

            match verifier.verify(token).await {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    metrics::increment_error_count();
                    let response = e.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, reason: &str) -> ServiceResponse<EitherBody<B>> {
    metrics::increment_error_count();
    let response = AppError::Unauthenticated(reason.to_string()).error_response();
    req.into_response(response).map_into_right_body()
}
