//! Access logging: one `info` event per request with method, path, status
//! and elapsed milliseconds. The response passes through untouched.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

/// Request logging middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use campus::middleware::RequestLog;
///
/// let app = App::new().wrap(RequestLog);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestLog`].
pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let result = fut.await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            match &result {
                Ok(res) => info!(
                    method = %method,
                    path = %path,
                    status = res.status().as_u16(),
                    elapsed_ms,
                    "request completed"
                ),
                Err(error) => warn!(
                    method = %method,
                    path = %path,
                    %error,
                    elapsed_ms,
                    "request failed"
                ),
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn responses_pass_through_unchanged() {
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/teapot",
            web::get().to(|| async { HttpResponse::ImATeapot().body("short and stout") }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/teapot").to_request())
            .await;

        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(test::read_body(res).await, "short and stout".as_bytes());
    }

    #[actix_web::test]
    async fn unmatched_paths_still_404() {
        let app = test::init_service(App::new().wrap(RequestLog)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
