//! HTTP transport abstraction.
//!
//! The executor never talks to `reqwest` directly. It hands a fully built
//! request to an [`HttpTransport`], which makes it possible to observe the
//! final URL/headers/body in tests or to return a synthetic response without
//! opening a socket.

use crate::error::ImageError;
use crate::execution::http::client::build_http_client_from_config;
use crate::types::HttpConfig;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// Transport-level request data for a POST with an already serialized body.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the full response.
///
/// Implementations return an error only when no response was received at
/// all. Non-2xx statuses are regular responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpTransportRequest)
    -> Result<HttpTransportResponse, ImageError>;
}

/// Default transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, ImageError> {
        Ok(Self::new(build_http_client_from_config(config)?))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, ImageError> {
        let resp = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?.to_vec();
        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }
}
