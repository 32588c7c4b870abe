//! The boundary between request assembly and the HTTP stack.
//!
//! A [`RequestBuilder`](crate::RequestBuilder) produces an [`AuthorizedRequest`]
//! and hands it to a [`Transport`]. `reqwest::Client` is a transport out of the
//! box; tests and custom stacks implement the trait themselves.

use std::error::Error as StdError;
use std::ops::Deref;

use async_trait::async_trait;
use http::{HeaderMap, Method};
use url::Url;

/// A signed request, ready to be sent.
#[derive(Debug, Clone)]
pub struct AuthorizedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl AuthorizedRequest {
    pub(crate) fn new(method: Method, url: Url, headers: HeaderMap, body: Option<String>) -> Self {
        AuthorizedRequest {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}

impl From<AuthorizedRequest> for reqwest::Request {
    fn from(request: AuthorizedRequest) -> Self {
        let (method, url, headers, body) = request.into_parts();
        let mut req = reqwest::Request::new(method, url);
        *req.headers_mut() = headers;
        if let Some(body) = body {
            *req.body_mut() = Some(body.into());
        }
        req
    }
}

/// Sends an [`AuthorizedRequest`].
///
/// Timeouts, redirects and TLS are the transport's business. Errors are
/// reported to the caller as [`Error::RequestFailed`](crate::Error::RequestFailed)
/// and never retried.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: Send;
    type Error: StdError + Send + Sync + 'static;

    async fn send(&self, request: AuthorizedRequest) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl Transport for reqwest::Client {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    async fn send(&self, request: AuthorizedRequest) -> Result<Self::Response, Self::Error> {
        self.execute(request.into()).await
    }
}

/// Blocking counterpart of [`Transport`].
#[cfg(feature = "blocking")]
pub trait BlockingTransport {
    type Response;
    type Error: StdError + Send + Sync + 'static;

    fn send(&self, request: AuthorizedRequest) -> Result<Self::Response, Self::Error>;
}

#[cfg(feature = "blocking")]
impl From<AuthorizedRequest> for reqwest::blocking::Request {
    fn from(request: AuthorizedRequest) -> Self {
        let (method, url, headers, body) = request.into_parts();
        let mut req = reqwest::blocking::Request::new(method, url);
        *req.headers_mut() = headers;
        if let Some(body) = body {
            *req.body_mut() = Some(body.into());
        }
        req
    }
}

#[cfg(feature = "blocking")]
impl BlockingTransport for reqwest::blocking::Client {
    type Response = reqwest::blocking::Response;
    type Error = reqwest::Error;

    fn send(&self, request: AuthorizedRequest) -> Result<Self::Response, Self::Error> {
        self.execute(request.into())
    }
}

/// What a transport answered, kept opaque.
#[derive(Debug)]
pub struct Response<R> {
    inner: R,
}

impl<R> Response<R> {
    pub(crate) fn new(inner: R) -> Self {
        Response { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> Deref for Response<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
