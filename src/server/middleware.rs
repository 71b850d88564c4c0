//! Authentication middleware
//!
//! Actix-web adapter around the dispatcher. Requests whose path no scope
//! protects pass through untouched; requests a scope authenticates carry
//! their [`Principal`] in the request extensions; everything else is
//! answered with 401.

use crate::credentials::records::Principal;
use crate::AuthGate;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError};
use futures::future::{ready, Ready};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// Auth middleware for Actix-web
pub struct AuthGateMiddleware {
    gate: Arc<AuthGate>,
}

impl AuthGateMiddleware {
    /// Wrap an assembled gate for use with `App::wrap`
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGateMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthGateMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddlewareService {
            service,
            gate: self.gate.clone(),
        }))
    }
}

/// Service implementation for the auth middleware
pub struct AuthGateMiddlewareService<S> {
    service: S,
    gate: Arc<AuthGate>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if !self.gate.protects(&path) {
            return Box::pin(self.service.call(req));
        }

        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let outcome = self.gate.handle(&path, authorization.as_deref());

        match outcome.into_principal() {
            Some(principal) => {
                req.extensions_mut().insert(principal);
                Box::pin(self.service.call(req))
            }
            None => {
                debug!(path, "rejecting unauthenticated request");
                Box::pin(async move { Err(Unauthorized.into()) })
            }
        }
    }
}

/// Read the authenticated principal back out of a request
pub fn principal(req: &HttpRequest) -> Option<Principal> {
    req.extensions().get::<Principal>().cloned()
}

/// 401 answer for requests a scope rejects
///
/// The body never discloses which factor failed.
#[derive(Debug)]
struct Unauthorized;

impl fmt::Display for Unauthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authentication required")
    }
}

impl ResponseError for Unauthorized {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, "Basic realm=\"authgate\""))
            .json(serde_json::json!({
                "error": {
                    "code": "UNAUTHORIZED",
                    "message": self.to_string(),
                }
            }))
    }
}
