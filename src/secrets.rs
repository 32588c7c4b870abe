use std::fmt;

/// Consumer credentials plus an optional token credential.
///
/// The token is absent while a request token is being acquired; in that case
/// the token secret used for signing is the empty string.
#[derive(Clone)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
    token: Option<(String, String)>,
}

impl Secrets {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            token: Some((token.into(), token_secret.into())),
            ..self
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token_key(&self) -> Option<&str> {
        self.token.as_ref().map(|(token, _)| token.as_str())
    }

    /// Returns `(consumer_secret, token_secret)`.
    pub fn secret_pair(&self) -> (&str, &str) {
        let token_secret = self
            .token
            .as_ref()
            .map(|(_, secret)| secret.as_str())
            .unwrap_or_default();
        (&self.consumer_secret, token_secret)
    }
}

// secrets must never end up in logs
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token_key())
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
