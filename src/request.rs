// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::{fmt, str::FromStr, sync::Arc};

use http::{
    header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, EXPECT},
    HeaderMap, Method,
};
use log::debug;
use serde::Serialize;
use url::{form_urlencoded, Url};

#[cfg(feature = "blocking")]
use crate::BlockingTransport;
use crate::{
    encode::{encode_pairs, percent_encode},
    nonce::{generate_nonce, timestamp},
    signer::base_string_uri,
    AuthorizedRequest, Error, OAuthParameters, Response, Result, Secrets, SignatureMethods,
    Transport, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_TIMESTAMP_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION, OAUTH_VERSION_KEY, REALM_KEY,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Where the OAuth parameters travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    /// `Authorization: OAuth realm="...", ...`
    Header,
    /// Appended to the `application/x-www-form-urlencoded` body.
    PostBody,
    /// Appended to the URL query.
    QueryString,
}

impl DeliveryMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            DeliveryMode::Header => "header",
            DeliveryMode::PostBody => "post_body",
            DeliveryMode::QueryString => "query_string",
        }
    }
}

impl Default for DeliveryMode {
    fn default() -> Self {
        DeliveryMode::Header
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(DeliveryMode::Header),
            "post_body" | "body" => Ok(DeliveryMode::PostBody),
            "query_string" | "query" => Ok(DeliveryMode::QueryString),
            _ => Err(Error::InvalidAuthType(s.to_string())),
        }
    }
}

/// A request waiting to be signed.
///
/// Everything stays mutable until [`build_request`](Self::build_request) or
/// [`send`](Self::send). Each build stamps a fresh timestamp and nonce, so one
/// builder can be built and sent several times.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    secrets: Secrets,
    delivery_mode: DeliveryMode,
    parameters: OAuthParameters,
    form: Vec<(String, String)>,
    headers: HeaderMap,
    signature_methods: Arc<SignatureMethods>,
}

impl RequestBuilder {
    /// Starts a `POST` request.
    ///
    /// # Errors
    ///
    /// This method fails with [`Error::InvalidUrl`] when `url` is not an
    /// absolute URI.
    pub fn new<U: AsRef<str>>(url: U, secrets: Secrets) -> Result<Self> {
        Self::with_method(Method::POST, url, secrets)
    }

    /// Starts a request with the given method.
    ///
    /// # Errors
    ///
    /// This method fails with [`Error::InvalidUrl`] when `url` is not an
    /// absolute URI.
    pub fn with_method<U: AsRef<str>>(method: Method, url: U, secrets: Secrets) -> Result<Self> {
        let url = url.as_ref();
        let url = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(RequestBuilder {
            method,
            url,
            secrets,
            delivery_mode: DeliveryMode::default(),
            parameters: OAuthParameters::new(),
            form: Vec::new(),
            headers: HeaderMap::new(),
            signature_methods: Arc::new(SignatureMethods::default()),
        })
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn request_method(&self) -> &Method {
        &self.method
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn oauth_parameters(&self) -> &OAuthParameters {
        &self.parameters
    }

    // ------------------------------------------------------------------------
    // Configuration

    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) -> &mut Self {
        self.delivery_mode = mode;
        self
    }

    pub fn with_delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.set_delivery_mode(mode);
        self
    }

    /// Replace the OAuth protocol parameters.
    pub fn parameters(self, parameters: OAuthParameters) -> Self {
        RequestBuilder { parameters, ..self }
    }

    /// Replace the signature method registry.
    pub fn signature_methods(self, signature_methods: Arc<SignatureMethods>) -> Self {
        RequestBuilder {
            signature_methods,
            ..self
        }
    }

    /// Modify the query string of the URL.
    ///
    /// The pairs are appended, existing keys are not overwritten, and they
    /// take part in the signature.
    /// Calling `.query(&[("foo", "a"), ("foo", "b")])` gives `"foo=a&foo=b"`.
    ///
    /// # Errors
    /// This method fails if `query` cannot be serialized into a query string.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Result<Self> {
        {
            let mut pairs = self.url.query_pairs_mut();
            let serializer = serde_urlencoded::Serializer::new(&mut pairs);
            query.serialize(serializer)?;
        }
        // cleanup
        if let Some("") = self.url.query() {
            self.url.set_query(None);
        }
        Ok(self)
    }

    /// Send a form body.
    ///
    /// The pairs take part in the signature. With [`DeliveryMode::PostBody`]
    /// the OAuth parameters are appended after them.
    ///
    /// # Errors
    /// This method fails if `form` cannot be serialized as form pairs.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Result<Self> {
        let body = serde_urlencoded::to_string(form)?;
        self.form
            .extend(form_urlencoded::parse(body.as_bytes()).into_owned());
        Ok(self)
    }

    /// Add a `Header` to this Request.
    ///
    /// `Expect` is always dropped when the request is built.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(key, value);
        self
    }

    // ------------------------------------------------------------------------
    // Build and send

    /// Signs the request and places the OAuth parameters into the
    /// configured channel.
    ///
    /// # Errors
    ///
    /// This method fails with [`Error::UnknownSignatureMethod`] when
    /// `oauth_signature_method` names no registered method, with
    /// [`Error::Signer`] when the method cannot sign with the given secrets,
    /// or with [`Error::InvalidRealm`] when the realm override cannot be
    /// written as a quoted header value.
    pub fn build_request(&self) -> Result<AuthorizedRequest> {
        self.build_request_with(timestamp(), generate_nonce())
    }

    pub(crate) fn build_request_with(
        &self,
        timestamp: u64,
        nonce: String,
    ) -> Result<AuthorizedRequest> {
        let mut oauth = self.parameters.clone();
        oauth.remove(OAUTH_SIGNATURE_KEY);
        oauth.insert(OAUTH_CONSUMER_KEY, self.secrets.consumer_key());
        if let Some(token) = self.secrets.token_key() {
            oauth.insert(OAUTH_TOKEN_KEY, token);
        }
        oauth.insert(OAUTH_TIMESTAMP_KEY, timestamp.to_string());
        oauth.insert(OAUTH_NONCE_KEY, nonce);
        oauth.insert(OAUTH_VERSION_KEY, OAUTH_VERSION);

        let strategy = self
            .signature_methods
            .resolve(oauth.get_signature_method())?;
        debug!(
            "signing {} {} with {}",
            self.method,
            base_string_uri(&self.url),
            strategy.name()
        );
        oauth.insert(OAUTH_SIGNATURE_METHOD_KEY, strategy.name());

        // oauth_* first, then the query, then the form
        let signed: Vec<(String, String)> = oauth
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain(self.url.query_pairs().into_owned())
            .chain(self.form.iter().cloned())
            .collect();
        let (consumer_secret, token_secret) = self.secrets.secret_pair();
        let signature = strategy.sign(
            self.method.as_str(),
            &self.url,
            &signed,
            consumer_secret,
            token_secret,
        )?;
        oauth.insert(OAUTH_SIGNATURE_KEY, signature);

        let mut url = self.url.clone();
        let mut headers = self.headers.clone();
        let mut body = if self.form.is_empty() {
            None
        } else {
            Some(encode_pairs(
                self.form.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ))
        };

        match self.delivery_mode {
            DeliveryMode::Header => {
                let realm = match oauth.get_realm() {
                    Some(realm) if realm.contains(&['"', '\\'][..]) => {
                        return Err(Error::InvalidRealm(realm.to_string()));
                    }
                    Some(realm) => realm.to_string(),
                    None => realm_of(&self.url),
                };
                let value = authorization_header(&realm, &oauth);
                headers.insert(AUTHORIZATION, HeaderValue::from_str(&value)?);
            }
            DeliveryMode::PostBody => {
                let oauth_body = encode_pairs(oauth.iter());
                body = Some(match body {
                    Some(form) => format!("{}&{}", form, oauth_body),
                    None => oauth_body,
                });
            }
            DeliveryMode::QueryString => {
                let oauth_query = encode_pairs(oauth.iter());
                let query = match url.query() {
                    Some(q) if !q.is_empty() => format!("{}&{}", q, oauth_query),
                    _ => oauth_query,
                };
                url.set_query(Some(&query));
            }
        }

        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }
        // no 100-continue round trip
        headers.remove(EXPECT);

        Ok(AuthorizedRequest::new(self.method.clone(), url, headers, body))
    }

    /// Signs the request and sends it through `transport`.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`build_request`](Self::build_request), which
    /// are raised before anything is sent, this method fails with
    /// [`Error::RequestFailed`] when the transport fails. It never retries.
    pub async fn send<T>(&self, transport: &T) -> Result<Response<T::Response>>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_request()?;
        debug!("sending {} {}", request.method(), base_string_uri(request.url()));
        match transport.send(request).await {
            Ok(resp) => Ok(Response::new(resp)),
            Err(err) => {
                debug!("request failed: {}", err);
                Err(Error::request_failed(err))
            }
        }
    }

    /// Blocking flavor of [`send`](Self::send).
    #[cfg(feature = "blocking")]
    pub fn send_blocking<T>(&self, transport: &T) -> Result<Response<T::Response>>
    where
        T: BlockingTransport + ?Sized,
    {
        let request = self.build_request()?;
        debug!("sending {} {}", request.method(), base_string_uri(request.url()));
        transport
            .send(request)
            .map(Response::new)
            .map_err(Error::request_failed)
    }
}

/// `<scheme>://<host>/`
fn realm_of(url: &Url) -> String {
    format!("{}://{}/", url.scheme(), url.host_str().unwrap_or_default())
}

fn authorization_header(realm: &str, oauth: &OAuthParameters) -> String {
    let mut header = format!("OAuth {}=\"{}\"", REALM_KEY, realm);
    for (key, value) in oauth.iter() {
        header.push_str(&format!(
            ", {}=\"{}\"",
            percent_encode(key),
            percent_encode(value)
        ));
    }
    header
}
