use std::collections::BTreeMap;

use crate::{OAUTH_CALLBACK_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_VERIFIER_KEY};

/// Signature method used when none is configured.
pub const DEFAULT_SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// The `oauth_*` protocol parameters of a request.
///
/// Names are unique and case sensitive, values are stored unencoded and are
/// iterated in name order. The realm is kept apart: it is only written to the
/// `Authorization` header and never takes part in the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParameters {
    params: BTreeMap<String, String>,
    realm: Option<String>,
}

impl Default for OAuthParameters {
    fn default() -> Self {
        let mut params = BTreeMap::new();
        params.insert(
            OAUTH_SIGNATURE_METHOD_KEY.to_string(),
            DEFAULT_SIGNATURE_METHOD.to_string(),
        );
        OAuthParameters {
            params,
            realm: None,
        }
    }
}

impl OAuthParameters {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<String>,
    {
        self.parameter(OAUTH_CALLBACK_KEY, callback)
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<String>,
    {
        self.parameter(OAUTH_VERIFIER_KEY, verifier)
    }

    /// set the oauth_signature_method value, e.g. `"RSA-SHA1"`
    ///
    /// The name is resolved against the signature method registry when the
    /// request is built, not here.
    pub fn signature_method<T>(self, signature_method: T) -> Self
    where
        T: Into<String>,
    {
        self.parameter(OAUTH_SIGNATURE_METHOD_KEY, signature_method)
    }

    /// set the realm of the `Authorization` header
    ///
    /// # Note
    /// When no realm is set, it is derived from the request URL as
    /// `<scheme>://<host>/`. The value is written verbatim, so building a
    /// header fails when it contains `"` or `\`.
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<String>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set an arbitrary protocol parameter
    pub fn parameter<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a parameter, returning the previous value.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn get_signature_method(&self) -> &str {
        self.get(OAUTH_SIGNATURE_METHOD_KEY)
            .unwrap_or(DEFAULT_SIGNATURE_METHOD)
    }

    pub fn get_realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// Iterates parameters sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_hmac_sha1() {
        let params = OAuthParameters::new();
        assert_eq!(params.get_signature_method(), "HMAC-SHA1");
        assert_eq!(params.get_realm(), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn removing_method_falls_back_to_default() {
        let mut params = OAuthParameters::new().signature_method("PLAINTEXT");
        assert_eq!(params.get_signature_method(), "PLAINTEXT");
        params.remove(OAUTH_SIGNATURE_METHOD_KEY);
        assert_eq!(params.get_signature_method(), DEFAULT_SIGNATURE_METHOD);
    }

    #[test]
    fn iterates_in_name_order() {
        let params = OAuthParameters::new()
            .verifier("hfdp7dh39dks9884")
            .callback("oob")
            .parameter("oauth_body_hash", "2jmj7l5rSw0yVb/vlWAYkK/YBwk=");
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec![
                "oauth_body_hash",
                "oauth_callback",
                "oauth_signature_method",
                "oauth_verifier"
            ]
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let params = OAuthParameters::new()
            .parameter("oauth_Foo", "upper")
            .parameter("oauth_foo", "lower");
        assert_eq!(params.get("oauth_Foo"), Some("upper"));
        assert_eq!(params.get("oauth_foo"), Some("lower"));
    }

    #[test]
    fn accepts_extension_names() {
        let params = OAuthParameters::new().parameter("xoauth_requestor_id", "1234");
        assert!(params.contains("xoauth_requestor_id"));
        assert_eq!(params.get("xoauth_requestor_id"), Some("1234"));
    }

    #[test]
    fn realm_is_not_a_parameter() {
        let params = OAuthParameters::new().realm("Photos");
        assert_eq!(params.get_realm(), Some("Photos"));
        assert_eq!(params.get("realm"), None);
    }
}
