use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use slog::{info, Logger};
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::auth_information::AuthInformation;
use common::auth_helper;

/// Verifies the `Authorization: Bearer` token on every request of the
/// wrapped scope and injects the resolved identity into request extensions.
/// Register and login are mounted outside this scope.
pub struct AuthMiddleware {
    pub secret: String,
    pub log: Logger,
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
            log: self.log.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    secret: String,
    log: Logger,
}

fn bearer_token(req: &ServiceRequest) -> Result<String, &'static str> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or("Missing Authorization header")?;
    let value = header
        .to_str()
        .map_err(|_| "Authorization header is not a valid string")?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use the Bearer scheme")?;
    Ok(token.trim().to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let secret = self.secret.clone();
        let log = self.log.clone();

        Box::pin(async move {
            let token = match bearer_token(&req) {
                Ok(token) => token,
                Err(reason) => {
                    info!(log, "authentication failed"; "reason" => reason, "path" => req.path().to_string());
                    let response =
                        HttpResponse::Unauthorized().json(json!({ "message": reason }));
                    return Ok(req
                        .into_response(response.map_into_boxed_body().map_into_right_body()));
                }
            };

            match auth_helper::decode_token(&secret, &token) {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthInformation { user_id });
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    info!(log, "authentication failed"; "reason" => format!("{}", e), "path" => req.path().to_string());
                    let response = HttpResponse::Unauthorized()
                        .json(json!({ "message": "Invalid or expired token" }));
                    Ok(req.into_response(response.map_into_boxed_body().map_into_right_body()))
                }
            }
        })
    }
}
