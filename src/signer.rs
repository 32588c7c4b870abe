//! Signature methods and the signature base string (RFC 5849 section 3.4).

use std::collections::HashMap;
use std::fmt;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use log::trace;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use url::Url;

use crate::encode::percent_encode;
use crate::{Error, Result, SignError, SignResult, OAUTH_SIGNATURE_KEY, REALM_KEY};

/// A named OAuth signature method.
///
/// Implementations must be deterministic: the same inputs always yield the
/// same signature. `parameters` holds every parameter taking part in the
/// signature, both `oauth_*` and request parameters, unencoded and in any
/// order; names may repeat.
pub trait SigningStrategy: Send + Sync {
    /// The `oauth_signature_method` value this strategy answers to.
    fn name(&self) -> &'static str;

    fn sign(
        &self,
        method: &str,
        url: &Url,
        parameters: &[(String, String)],
        consumer_secret: &str,
        token_secret: &str,
    ) -> SignResult<String>;
}

/// Normalized request parameters (RFC 5849 section 3.4.1.3.2).
///
/// `oauth_signature` and `realm` are excluded. Pairs are encoded first and
/// then sorted by name, ties broken by value.
pub fn normalize_parameters(parameters: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = parameters
        .iter()
        .filter(|(k, _)| k != OAUTH_SIGNATURE_KEY && k != REALM_KEY)
        .map(|(k, v)| (percent_encode(k).into_owned(), percent_encode(v).into_owned()))
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Base string URI (RFC 5849 section 3.4.1.2): no query nor fragment, and the
/// port only when it is not the scheme's default.
pub fn base_string_uri(url: &Url) -> String {
    let mut uri = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        uri.push(':');
        uri.push_str(&port.to_string());
    }
    uri.push_str(url.path());
    uri
}

/// `METHOD&encoded_uri&encoded_parameters`
pub fn signature_base_string(method: &str, url: &Url, parameters: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        percent_encode(&method.to_ascii_uppercase()),
        percent_encode(&base_string_uri(url)),
        percent_encode(&normalize_parameters(parameters))
    )
}

fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// `HMAC-SHA1`, keyed with both secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha1;

impl SigningStrategy for HmacSha1 {
    fn name(&self) -> &'static str {
        "HMAC-SHA1"
    }

    fn sign(
        &self,
        method: &str,
        url: &Url,
        parameters: &[(String, String)],
        consumer_secret: &str,
        token_secret: &str,
    ) -> SignResult<String> {
        let base = signature_base_string(method, url, parameters);
        trace!("signature base string: {}", base);

        let key = signing_key(consumer_secret, token_secret);
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .map_err(|err| SignError::InvalidKey(err.to_string()))?;
        mac.update(base.as_bytes());
        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `RSA-SHA1`, RSASSA-PKCS1-v1_5 over the base string.
///
/// The consumer secret carries the PEM encoded private key, PKCS#8 or
/// PKCS#1. The token secret is not used.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaSha1;

impl RsaSha1 {
    fn parse_private_key(pem: &str) -> SignResult<RsaPrivateKey> {
        match RsaPrivateKey::from_pkcs8_pem(pem) {
            Ok(key) => Ok(key),
            Err(_) => RsaPrivateKey::from_pkcs1_pem(pem)
                .map_err(|err| SignError::InvalidPrivateKey(err.to_string())),
        }
    }
}

impl SigningStrategy for RsaSha1 {
    fn name(&self) -> &'static str {
        "RSA-SHA1"
    }

    fn sign(
        &self,
        method: &str,
        url: &Url,
        parameters: &[(String, String)],
        consumer_secret: &str,
        _token_secret: &str,
    ) -> SignResult<String> {
        let key = Self::parse_private_key(consumer_secret)?;
        let base = signature_base_string(method, url, parameters);
        trace!("signature base string: {}", base);

        let signing_key = SigningKey::<Sha1>::new(key);
        let signature = signing_key
            .try_sign_with_rng(&mut rand::thread_rng(), base.as_bytes())
            .map_err(|err| SignError::Rsa(err.to_string()))?;
        Ok(BASE64_STANDARD.encode(signature.to_bytes()))
    }
}

/// `PLAINTEXT`, the encoded secrets themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

impl SigningStrategy for Plaintext {
    fn name(&self) -> &'static str {
        "PLAINTEXT"
    }

    fn sign(
        &self,
        _method: &str,
        _url: &Url,
        _parameters: &[(String, String)],
        consumer_secret: &str,
        token_secret: &str,
    ) -> SignResult<String> {
        Ok(signing_key(consumer_secret, token_secret))
    }
}

/// Registry resolving `oauth_signature_method` names to strategies.
///
/// The default registry knows `HMAC-SHA1`, `RSA-SHA1` and `PLAINTEXT`.
/// Lookup is an exact, case-sensitive match.
pub struct SignatureMethods {
    methods: HashMap<&'static str, Box<dyn SigningStrategy>>,
}

impl Default for SignatureMethods {
    fn default() -> Self {
        SignatureMethods::empty()
            .with(HmacSha1)
            .with(RsaSha1)
            .with(Plaintext)
    }
}

impl SignatureMethods {
    /// A registry without any method.
    pub fn empty() -> Self {
        SignatureMethods {
            methods: HashMap::new(),
        }
    }

    /// Registers `strategy` under its name, replacing any previous one.
    pub fn register<S>(&mut self, strategy: S) -> &mut Self
    where
        S: SigningStrategy + 'static,
    {
        self.methods.insert(strategy.name(), Box::new(strategy));
        self
    }

    pub fn with<S>(mut self, strategy: S) -> Self
    where
        S: SigningStrategy + 'static,
    {
        self.register(strategy);
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn SigningStrategy> {
        self.methods
            .get(name)
            .map(|strategy| &**strategy)
            .ok_or_else(|| Error::UnknownSignatureMethod(name.to_string()))
    }

    /// Registered names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }
}

impl fmt::Debug for SignatureMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("SignatureMethods")
            .field("methods", &names)
            .finish()
    }
}
