//! Upstream request construction.
//!
//! # Responsibilities
//! - Convert a directed inbound request into an outbound client request
//! - Strip hop-by-hop headers
//! - Stream the request body without buffering
//!
//! # Design Decisions
//! - Method, headers and body are forwarded verbatim otherwise
//! - Requests known to be bodiless are sent without a body so no
//!   `Transfer-Encoding: chunked` is introduced

use axum::body::{Body, HttpBody};
use axum::http::Request;

use crate::security::headers::strip_hop_by_hop;

/// Build the outbound request for a request already rewritten by the director.
pub fn upstream_request(client: &reqwest::Client, request: Request<Body>) -> reqwest::RequestBuilder {
    let (mut parts, body) = request.into_parts();
    strip_hop_by_hop(&mut parts.headers);

    let builder = client
        .request(parts.method, parts.uri.to_string())
        .headers(parts.headers);

    if body.size_hint().exact() == Some(0) {
        builder
    } else {
        builder.body(reqwest::Body::wrap_stream(body.into_data_stream()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{CONNECTION, CONTENT_TYPE, HOST};

    #[test]
    fn test_upstream_request_preserves_method_uri_and_headers() {
        let client = reqwest::Client::new();
        let request = Request::builder()
            .method("PATCH")
            .uri("https://api.github.com/repos/o/r?x=1")
            .header(HOST, "api.github.com")
            .header(CONTENT_TYPE, "application/json")
            .header(CONNECTION, "keep-alive")
            .body(Body::from(r#"{"name":"r2"}"#))
            .unwrap();

        let built = upstream_request(&client, request).build().unwrap();

        assert_eq!(built.method(), "PATCH");
        assert_eq!(built.url().as_str(), "https://api.github.com/repos/o/r?x=1");
        assert_eq!(built.headers()[HOST], "api.github.com");
        assert_eq!(built.headers()[CONTENT_TYPE], "application/json");
        assert!(!built.headers().contains_key(CONNECTION));
        assert!(built.body().is_some());
    }

    #[test]
    fn test_empty_body_not_attached() {
        let client = reqwest::Client::new();
        let request = Request::builder()
            .uri("https://github.com/octocat/Hello-World")
            .body(Body::empty())
            .unwrap();

        let built = upstream_request(&client, request).build().unwrap();
        assert!(built.body().is_none());
    }
}
