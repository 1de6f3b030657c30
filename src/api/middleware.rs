//! Middleware Components
//!
//! CORS, request ids and the session cookie.

use crate::session_store::SessionId;
use axum::{
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderName, HeaderValue, Method,
    },
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer, ExposeHeaders};
use uuid::Uuid;

/// Request ID header key
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cookie carrying the player's session id
pub const SESSION_COOKIE: &str = "lexiguess_session";

/// Create CORS middleware with configurable origins
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.contains(&"*".to_string()) {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(ExposeHeaders::list([HeaderName::from_static(REQUEST_ID_HEADER)]))
    } else {
        // Cookies only travel with an explicit origin list
        CorsLayer::new()
            .allow_origin(
                allowed_origins
                    .into_iter()
                    .filter_map(|o| o.parse().ok())
                    .collect::<Vec<HeaderValue>>(),
            )
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true)
            .expose_headers(ExposeHeaders::list([HeaderName::from_static(REQUEST_ID_HEADER)]))
    }
}

/// Request ID wrapper for extracting in handlers
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware to add request ID to all requests
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    // Check if request already has an ID from client
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware resolving the player's session from the session cookie.
///
/// Requests without a usable cookie get a fresh [`SessionId`], which is sent
/// back as a `Set-Cookie` header so the next request lands in the same game.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let existing = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(session_from_cookie_header);

    let (session_id, issued) = match existing {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    };

    request.extensions_mut().insert(session_id.clone());

    let mut response = next.run(request).await;

    if issued {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session_id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

fn session_from_cookie_header(header: &str) -> Option<SessionId> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_parsing() {
        let id = SessionId::generate();
        let header = format!("theme=dark; {}={}; other=1", SESSION_COOKIE, id);
        assert_eq!(session_from_cookie_header(&header), Some(id));
    }

    #[test]
    fn test_cookie_header_without_session() {
        assert_eq!(session_from_cookie_header("theme=dark"), None);
        assert_eq!(session_from_cookie_header(""), None);
        assert_eq!(session_from_cookie_header("lexiguess_session=garbage"), None);
    }
}
