//! Security headers middleware
//!
//! Hardens every response with headers appropriate for a token-issuing
//! JSON API:
//! - X-Content-Type-Options: nosniff - prevents MIME type sniffing
//! - X-Frame-Options: DENY - prevents clickjacking
//! - Cache-Control: no-store - bodies can carry bearer tokens
//! - Strict-Transport-Security: HSTS for HTTPS enforcement
//! - Referrer-Policy: controls referrer information
//!
//! Author: hephaex@gmail.com

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Security headers middleware
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Login responses carry tokens; no intermediary may cache them
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
