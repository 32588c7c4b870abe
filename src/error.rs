use http::header::InvalidHeaderValue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid url {url:?} : {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown signature method : {0}")]
    UnknownSignatureMethod(String),
    #[error("invalid realm {0:?} : must not contain '\"' nor '\\'")]
    InvalidRealm(String),
    #[error("invalid auth type : {0}, must be one of header, post_body or query_string.")]
    InvalidAuthType(String),
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("invalid header value : {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("parameters could not be serialized : {0}")]
    Serialize(#[from] serde_urlencoded::ser::Error),
    #[error("request failed : {message}")]
    RequestFailed {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Wraps a transport failure, keeping its diagnostic message.
    pub(crate) fn request_failed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::RequestFailed {
            message: err.to_string(),
            source: Box::new(err),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum SignError {
    #[error("invalid signing key : {0}")]
    InvalidKey(String),
    #[error("RSA-SHA1 requires a PEM encoded private key as consumer secret : {0}")]
    InvalidPrivateKey(String),
    #[error("RSA signing failed : {0}")]
    Rsa(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_keeps_diagnostic() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = Error::request_failed(io);
        match &err {
            Error::RequestFailed { message, .. } => assert_eq!(message, "connection refused"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "request failed : connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
