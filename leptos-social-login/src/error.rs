use crate::provider::Provider;
use snafu::Snafu;
use std::fmt;
use std::sync::Arc;

/// Reasons why a compact token could not be turned into claims.
///
/// None of these are fatal. A caller receiving a `DecodeError` must simply treat the credential as
/// "no profile available".
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("DecodeError: Token has no payload segment"))]
    MissingPayload,

    #[snafu(display("DecodeError: Payload segment is not valid base64"))]
    Base64 { source: base64::DecodeError },

    #[snafu(display("DecodeError: Payload is not valid UTF-8 text"))]
    Utf8 { source: std::string::FromUtf8Error },

    #[snafu(display("DecodeError: Payload is not valid JSON: {source}"))]
    Json {
        #[snafu(source(from(serde_json::Error, Arc::new)))]
        source: Arc<serde_json::Error>,
    },

    #[snafu(display("DecodeError: Payload is valid JSON but not an object"))]
    NotAnObject,

    #[snafu(display("DecodeError: Could not decode token header"))]
    Header { source: jsonwebtoken::errors::Error },
}

/// A failed login, as reported by one of the external login widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFailure {
    /// The provider whose widget reported the failure.
    pub provider: Provider,

    /// Whatever the widget told us about the failure. Widgets are not required to tell much.
    pub reason: String,
}

impl LoginFailure {
    pub fn new(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} login failed: {}", self.provider, self.reason)
    }
}

impl std::error::Error for LoginFailure {}

/// Errors surfaced by the login view controller. Exposed through `SocialLogin::last_error`.
#[derive(Debug, Clone, Snafu)]
pub enum SocialLoginError {
    #[snafu(display("SocialLoginError: Could not decode credential"))]
    Decode { source: DecodeError },

    #[snafu(display("SocialLoginError: {failure}"))]
    LoginFailed { failure: LoginFailure },
}
