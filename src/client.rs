// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::sync::Arc;

use http::Method;

use crate::{
    DeliveryMode, OAuthParameters, RequestBuilder, Response, Result, Secrets, SignatureMethods,
    Transport,
};

/// Turns a transport into an OAuth 1.0 [`Client`].
///
/// Implemented for every [`Transport`], so `reqwest::Client::new().oauth1(secrets)`
/// works out of the box.
pub trait OAuthClientProvider: Transport + Sized {
    fn oauth1(self, secrets: Secrets) -> Client<Self> {
        self.oauth1_with_params(secrets, OAuthParameters::new())
    }

    fn oauth1_with_params(self, secrets: Secrets, parameters: OAuthParameters) -> Client<Self>;
}

impl<T> OAuthClientProvider for T
where
    T: Transport,
{
    fn oauth1_with_params(self, secrets: Secrets, parameters: OAuthParameters) -> Client<Self> {
        Client::new_with_params(self, secrets, parameters)
    }
}

/// A transport bundled with the credentials and defaults applied to every
/// request it starts.
#[derive(Debug)]
pub struct Client<T> {
    inner: T,
    secrets: Secrets,
    parameters: OAuthParameters,
    delivery_mode: DeliveryMode,
    signature_methods: Arc<SignatureMethods>,
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Constructs a new `Client` with default OAuth parameters.
    pub fn new(transport: T, secrets: Secrets) -> Self {
        Client::new_with_params(transport, secrets, OAuthParameters::new())
    }

    pub fn new_with_params(transport: T, secrets: Secrets, parameters: OAuthParameters) -> Self {
        Client {
            inner: transport,
            secrets,
            parameters,
            delivery_mode: DeliveryMode::default(),
            signature_methods: Arc::new(SignatureMethods::default()),
        }
    }

    /// Delivery mode of the requests started from now on.
    pub fn delivery_mode(self, delivery_mode: DeliveryMode) -> Self {
        Client {
            delivery_mode,
            ..self
        }
    }

    /// Registry shared by the requests started from now on.
    pub fn signature_methods(self, signature_methods: SignatureMethods) -> Self {
        Client {
            signature_methods: Arc::new(signature_methods),
            ..self
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner
    }

    /// Convenience method to make a `GET` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn get<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::GET, url)
    }

    /// Convenience method to make a `POST` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn post<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::POST, url)
    }

    /// Convenience method to make a `PUT` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn put<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::PUT, url)
    }

    /// Convenience method to make a `PATCH` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn patch<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::PATCH, url)
    }

    /// Convenience method to make a `DELETE` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn delete<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::DELETE, url)
    }

    /// Convenience method to make a `HEAD` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn head<U: AsRef<str>>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::HEAD, url)
    }

    /// Start building a request with the `Method` and `Url`, carrying this
    /// client's secrets, parameters, delivery mode and signature methods.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> Result<RequestBuilder> {
        Ok(
            RequestBuilder::with_method(method, url, self.secrets.clone())?
                .parameters(self.parameters.clone())
                .signature_methods(Arc::clone(&self.signature_methods))
                .with_delivery_mode(self.delivery_mode),
        )
    }

    /// Signs `request` and sends it with this client's transport.
    pub async fn send(&self, request: &RequestBuilder) -> Result<Response<T::Response>> {
        request.send(&self.inner).await
    }
}
