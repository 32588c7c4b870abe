/*!
oauth1-authorizer: OAuth 1.0 authorized requests for [reqwest](https://crates.io/crates/reqwest).

# Overview

This library builds OAuth 1.0 (RFC 5849) authorized requests. It stamps the
timestamp and nonce, computes the signature base string, signs it with a
signature method picked by name (`HMAC-SHA1`, `RSA-SHA1` or `PLAINTEXT`),
and places the OAuth parameters into the `Authorization` header, the form
body, or the query string.

# How to use

## Basic usecase 1 - sending the tweet

```rust,no_run
use oauth1_authorizer::{OAuthClientProvider, Secrets};

# async fn run() -> oauth1_authorizer::Result<()> {
// prepare authorization info
let consumer_key = "[CONSUMER_KEY]";
let consumer_secret = "[CONSUMER_SECRET]";
let access_token = "[ACCESS_TOKEN]";
let token_secret = "[TOKEN_SECRET]";

let secrets = Secrets::new(consumer_key, consumer_secret).token(access_token, token_secret);

// sample: send new tweet to twitter
let endpoint = "https://api.twitter.com/1.1/statuses/update.json";

let client = reqwest::Client::new().oauth1(secrets);
let request = client.post(endpoint)?.form(&[("status", "Hello, Twitter!")])?;
let resp = client.send(&request).await?;
println!("{}", resp.status());
# Ok(())
# }
```

## Basic usecase 2 - OAuth parameters in the query string

```rust,no_run
use oauth1_authorizer::{DeliveryMode, OAuthParameters, RequestBuilder, Secrets};
use http::Method;

# async fn run() -> oauth1_authorizer::Result<()> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let params = OAuthParameters::new().callback("oob").signature_method("PLAINTEXT");

let request = RequestBuilder::with_method(
    Method::GET,
    "https://api.example.com/oauth/request_token",
    secrets,
)?
.parameters(params)
.with_delivery_mode(DeliveryMode::QueryString);

// inspect what would be sent...
let authorized = request.build_request()?;
println!("{}", authorized.url());

// ...or send it
let resp = request.send(&reqwest::Client::new()).await?;
println!("{}", resp.status());
# Ok(())
# }
```
*/
mod client;
mod encode;
mod error;
mod nonce;
mod parameters;
mod request;
mod secrets;
mod signer;
mod transport;

// exposed to external program
pub use client::{Client, OAuthClientProvider};
pub use encode::percent_encode;
pub use error::{Error, Result, SignError, SignResult};
pub use parameters::{OAuthParameters, DEFAULT_SIGNATURE_METHOD};
pub use request::{DeliveryMode, RequestBuilder};
pub use secrets::Secrets;
pub use signer::{
    base_string_uri, normalize_parameters, signature_base_string, HmacSha1, Plaintext, RsaSha1,
    SignatureMethods, SigningStrategy,
};
#[cfg(feature = "blocking")]
pub use transport::BlockingTransport;
pub use transport::{AuthorizedRequest, Response, Transport};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

/// The only `oauth_version` value this crate sends.
pub const OAUTH_VERSION: &str = "1.0";
