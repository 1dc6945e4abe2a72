use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use slog::{info, Logger};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use crate::auth_information::AuthInformation;

/// Structured access log: one line per completed request with method, path,
/// status, latency and the authenticated user id when present.
pub struct ApiLoggerMiddleware {
    pub logger: Logger,
}

impl<S, B> Transform<S, ServiceRequest> for ApiLoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ApiLoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiLoggerMiddlewareService {
            service: Rc::new(service),
            logger: self.logger.clone(),
        }))
    }
}

pub struct ApiLoggerMiddlewareService<S> {
    service: Rc<S>,
    logger: Logger,
}

impl<S, B> Service<ServiceRequest> for ApiLoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let logger = self.logger.clone();
        let method = req.method().clone();
        let path = req.path().to_string();
        let query_string = req.query_string().to_string();
        let peer_addr = req
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default();

        let fut = self.service.call(req);

        Box::pin(async move {
            let start_time = Instant::now();
            let res = fut.await?;
            let duration = start_time.elapsed().as_millis() as u64;

            // set by the auth middleware on protected routes
            let user_id = res
                .request()
                .extensions()
                .get::<AuthInformation>()
                .map(|info| info.user_id.to_string())
                .unwrap_or_default();

            let status = res.response().status().as_u16();
            info!(logger, "api request";
                  "method" => method.as_str().to_string(),
                  "path" => &path,
                  "query" => &query_string,
                  "peer_addr" => &peer_addr,
                  "status" => status,
                  "duration_ms" => duration,
                  "user_id" => &user_id);

            Ok(res)
        })
    }
}
