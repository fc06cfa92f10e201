//! Request forwarding.
//!
//! The method, the end-to-end headers and the body bytes go to the matched
//! upstream unchanged. The upstream status, end-to-end headers and body come
//! back unchanged. Hop-by-hop headers, `Host` and framing headers are left
//! to each connection.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap as ActixHeaders, HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use reqwest::header::{HeaderMap as ReqwestHeaders, HeaderName as ReqwestName};
use serde_json::json;
use tracing::{debug, warn};

use super::GatewayState;
use super::routes::RouteRule;
use crate::domain::{TRACE_ID_HEADER, TraceId};

const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

fn is_forwardable(name: &str) -> bool {
    !HOP_BY_HOP.contains(&name) && name != "content-length"
}

fn outbound_headers(incoming: &ActixHeaders) -> ReqwestHeaders {
    let mut headers = ReqwestHeaders::new();
    for (name, value) in incoming {
        if !is_forwardable(name.as_str()) {
            continue;
        }
        let Ok(name) = ReqwestName::from_bytes(name.as_str().as_bytes()) else {
            continue;
        };
        if let Ok(value) = reqwest::header::HeaderValue::from_bytes(value.as_bytes()) {
            headers.append(name, value);
        }
    }
    let trace_value = TraceId::current()
        .and_then(|id| reqwest::header::HeaderValue::from_str(&id.to_string()).ok());
    if let Some(value) = trace_value {
        headers.insert(TRACE_ID_HEADER, value);
    }
    headers
}

fn bad_gateway(rule: &RouteRule, message: &str) -> HttpResponse {
    HttpResponse::BadGateway().json(json!({
        "status": StatusCode::BAD_GATEWAY.as_u16(),
        "error": "Bad Gateway",
        "message": message,
        "route": rule.id(),
        "traceId": TraceId::current().map(|id| id.to_string()),
    }))
}

/// Default service: forward to the first matching route or answer 404.
pub async fn forward(
    state: web::Data<GatewayState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let Some(rule) = state.routes.resolve(req.method(), req.path()) else {
        debug!(method = %req.method(), path = req.path(), "no route matched");
        return HttpResponse::NotFound().finish();
    };

    let path_and_query = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
    let target = rule.target(&path_and_query);
    let Ok(method) = reqwest::Method::from_bytes(req.method().as_str().as_bytes()) else {
        return HttpResponse::MethodNotAllowed().finish();
    };

    debug!(route = rule.id(), %target, "forwarding request");
    let upstream = state
        .client
        .request(method, &target)
        .headers(outbound_headers(req.headers()))
        .body(body)
        .send()
        .await;

    let response = match upstream {
        Ok(response) => response,
        Err(error) => {
            warn!(route = rule.id(), %target, %error, "upstream unreachable");
            return bad_gateway(rule, "upstream service is unreachable");
        }
    };

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    for (name, value) in response.headers() {
        if !is_forwardable(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            builder.append_header((name, value));
        }
    }

    match response.bytes().await {
        Ok(bytes) => builder.body(bytes),
        Err(error) => {
            warn!(route = rule.id(), %target, %error, "upstream body could not be read");
            bad_gateway(rule, "upstream response was interrupted")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_and_framing_headers_stay_local() {
        let mut incoming = ActixHeaders::new();
        incoming.insert(
            HeaderName::from_static("connection"),
            HeaderValue::from_static("keep-alive"),
        );
        incoming.insert(
            HeaderName::from_static("host"),
            HeaderValue::from_static("gateway:8000"),
        );
        incoming.insert(
            HeaderName::from_static("content-length"),
            HeaderValue::from_static("12"),
        );
        incoming.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Bearer abc"),
        );
        incoming.append(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("application/json"),
        );
        incoming.append(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("text/plain"),
        );

        let outbound = outbound_headers(&incoming);

        assert!(outbound.get("connection").is_none());
        assert!(outbound.get("host").is_none());
        assert!(outbound.get("content-length").is_none());
        assert_eq!(
            outbound.get("authorization").map(|v| v.as_bytes()),
            Some(b"Bearer abc".as_slice())
        );
        assert_eq!(outbound.get_all("accept").iter().count(), 2);
    }
}
