//! Integration test harness for Giftdesk.
//!
//! Tests drive the real admin router in-process with
//! [`tower::ServiceExt::oneshot`], backed by an [`InMemoryGiftCardStore`]
//! the test can seed and inspect directly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p giftdesk-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use thiserror::Error;
use tower::ServiceExt;

use giftdesk_admin::config::AdminConfig;
use giftdesk_admin::state::AppState;
use giftdesk_admin::store::InMemoryGiftCardStore;

/// Largest response body the harness will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// Buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// `Location` header of a redirect, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Errors raised by the harness itself, not by the app under test.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to build request: {0}")]
    Request(#[from] axum::http::Error),
    #[error("failed to read body: {0}")]
    Body(#[from] axum::Error),
    #[error("body is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Admin app wired to a fresh in-memory store.
pub struct TestApp {
    pub store: Arc<InMemoryGiftCardStore>,
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the app with UTC expiry handling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AdminConfig::local("http://localhost:3002"))
    }

    #[must_use]
    pub fn with_config(config: AdminConfig) -> Self {
        let store = Arc::new(InMemoryGiftCardStore::new());
        let state = AppState::new(config, store.clone());
        Self {
            store,
            router: giftdesk_admin::app(state),
        }
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the request cannot be built or the body read.
    pub async fn get(&self, path: &str) -> Result<TestResponse, HarnessError> {
        let request = Request::get(path).body(Body::empty())?;
        self.send(request).await
    }

    /// Issue a form-encoded POST request.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` if the request cannot be built or the body read.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<TestResponse, HarnessError> {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))?;
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> Result<TestResponse, HarnessError> {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT).await?;
        let body = String::from_utf8(bytes.to_vec())?;

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }
}

/// `application/x-www-form-urlencoded` body for `fields`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        assert_eq!(
            encode_form(&[("amount", "25.50"), ("message", "Happy birthday & more")]),
            "amount=25.50&message=Happy%20birthday%20%26%20more"
        );
        assert_eq!(encode_form(&[]), "");
    }
}
