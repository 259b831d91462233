//! Display-only decoding of compact tokens (JWTs).
//!
//! WARNING: Nothing in here verifies a signature, issuer, audience or expiry. Decoded claims are
//! suitable for showing the user who they signed in as. They are NOT suitable for making any
//! authorization decision. Use a verifying JWT library on a server for that.

use crate::claims::Claims;
use crate::error::{Base64Snafu, DecodeError, HeaderSnafu, JsonSnafu, MissingPayloadSnafu, Utf8Snafu};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::fmt;

/// Standard-alphabet engine, accepting payloads with or without padding.
/// Providers emit unpadded segments. Trailing bits are tolerated, like browsers do in `atob`.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// An opaque token of three dot-separated, URL-safe base64 encoded segments:
/// `header.payload.signature`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactToken(String);

impl CompactToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Extract the claims from the payload segment, without any verification.
    pub fn claims(&self) -> Result<Claims, DecodeError> {
        decode_claims(&self.0)
    }

    /// Decode the header segment, e.g. to show the signing algorithm or key id.
    pub fn header(&self) -> Result<jsonwebtoken::Header, DecodeError> {
        jsonwebtoken::decode_header(&self.0).context(HeaderSnafu)
    }
}

// Tokens are credentials. Never print them in full, not even in debug logs.
impl fmt::Debug for CompactToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompactToken")
            .field(&preview(&self.0, 12))
            .finish()
    }
}

impl From<String> for CompactToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for CompactToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

/// Extract the claims embedded in the payload (second) segment of a compact token.
///
/// The segment is translated from the URL-safe to the standard base64 alphabet, decoded to raw
/// bytes, read as UTF-8 text and finally parsed as a JSON object.
///
/// Fails with a [`DecodeError`] if the input has no payload segment, the segment is not base64,
/// the bytes are not UTF-8, or the text is not a JSON object.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|it| !it.is_empty())
        .context(MissingPayloadSnafu)?;

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(standard).context(Base64Snafu)?;

    // Bytes must be read as UTF-8. Casting them to chars one by one would mangle any non-ASCII
    // claim value.
    let text = String::from_utf8(bytes).context(Utf8Snafu)?;

    let value = serde_json::from_str::<serde_json::Value>(&text).context(JsonSnafu)?;
    let claims = Claims::from_value(value)?;

    tracing::trace!(claim_count = claims.as_map().len(), "Decoded token payload");
    Ok(claims)
}

/// The first `len` characters of `value`, followed by `...` when something was cut off.
pub(crate) fn preview(value: &str, len: usize) -> String {
    match value.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::{Value, json};

    const HEADER: &str = "eyJhbGciOiJIUzI1NiJ9";

    fn token_for(payload: &Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{HEADER}.{payload}.sig")
    }

    #[test]
    fn decodes_known_token() {
        let claims = decode_claims(
            "eyJhbGciOiJIUzI1NiJ9.eyJuYW1lIjoiQWxpY2UiLCJlbWFpbCI6ImFAYi5jb20ifQ.sig",
        )
        .unwrap();
        assert_that(claims.into_value()).is_equal_to(json!({ "name": "Alice", "email": "a@b.com" }));
    }

    #[test]
    fn round_trips_claims() {
        let original = json!({
            "name": "Alice",
            "email": "a@b.com",
            "picture": "https://example.com/a.png",
            "sub": "110169484474386276334",
            "aud": "client-id",
            "exp": 1_700_003_600,
            "iat": 1_700_000_000,
            "email_verified": true,
        });
        let claims = decode_claims(&token_for(&original)).unwrap();
        assert_that(claims.into_value()).is_equal_to(original);
    }

    #[test]
    fn keeps_non_ascii_values_intact() {
        let original = json!({ "name": "José Müller", "locale": "日本語" });
        let claims = decode_claims(&token_for(&original)).unwrap();
        assert_that(claims.name()).is_equal_to(Some("José Müller"));
        assert_that(claims.into_value()).is_equal_to(original);
    }

    #[test]
    fn decodes_url_safe_characters() {
        // "?>?" encodes to "Pz4_" in the URL-safe alphabet.
        let original = json!({ "q": "?>?~~~" });
        let token = token_for(&original);
        assert_that(token.contains('_') || token.contains('-')).is_true();
        assert_that(decode_claims(&token).unwrap().into_value()).is_equal_to(original);
    }

    #[test]
    fn accepts_padded_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"a":1}"#);
        assert_that(payload.ends_with('=')).is_true();
        let claims = decode_claims(&format!("{HEADER}.{payload}.sig")).unwrap();
        assert_that(claims.into_value()).is_equal_to(json!({ "a": 1 }));
    }

    #[test]
    fn only_needs_two_segments() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"a":1}"#);
        let claims = decode_claims(&format!("{HEADER}.{payload}")).unwrap();
        assert_that(claims.into_value()).is_equal_to(json!({ "a": 1 }));
    }

    #[test]
    fn rejects_token_without_payload() {
        assert_that(matches!(decode_claims("garbage"), Err(DecodeError::MissingPayload))).is_true();
        assert_that(matches!(decode_claims(""), Err(DecodeError::MissingPayload))).is_true();
        assert_that(matches!(decode_claims("header..sig"), Err(DecodeError::MissingPayload))).is_true();
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_that(matches!(
            decode_claims("header.not*base64!.sig"),
            Err(DecodeError::Base64 { .. })
        ))
        .is_true();
        // A single trailing character can never be valid base64.
        assert_that(matches!(decode_claims("header.eyJhb.sig"), Err(DecodeError::Base64 { .. })))
            .is_true();
    }

    #[test]
    fn rejects_invalid_utf8() {
        let payload = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert_that(matches!(
            decode_claims(&format!("{HEADER}.{payload}.sig")),
            Err(DecodeError::Utf8 { .. })
        ))
        .is_true();
    }

    #[test]
    fn rejects_non_json_payload() {
        let payload = URL_SAFE_NO_PAD.encode("hello world");
        assert_that(matches!(
            decode_claims(&format!("{HEADER}.{payload}.sig")),
            Err(DecodeError::Json { .. })
        ))
        .is_true();
    }

    #[test]
    fn rejects_json_that_is_not_an_object() {
        let payload = URL_SAFE_NO_PAD.encode("[1,2,3]");
        assert_that(matches!(
            decode_claims(&format!("{HEADER}.{payload}.sig")),
            Err(DecodeError::NotAnObject)
        ))
        .is_true();
    }

    #[test]
    fn decodes_header() {
        let token = CompactToken::new(token_for(&json!({ "sub": "1" })));
        let header = token.header().unwrap();
        assert_that(header.alg).is_equal_to(jsonwebtoken::Algorithm::HS256);
        assert_that(header.kid).is_equal_to(None);
    }

    #[test]
    fn debug_output_does_not_leak_token() {
        let token = CompactToken::new(token_for(&json!({ "sub": "1" })));
        let debug = format!("{token:?}");
        assert_that(debug.contains(token.as_str())).is_false();
        assert_that(debug).starts_with("CompactToken(\"eyJhbGciOiJI...");
    }

    #[test]
    fn previews_respect_char_boundaries() {
        assert_that(preview("abc", 5)).is_equal_to("abc".to_owned());
        assert_that(preview("abcdef", 3)).is_equal_to("abc...".to_owned());
        assert_that(preview("ééééé", 2)).is_equal_to("éé...".to_owned());
    }
}
