use crate::error::{DecodeError, NotAnObjectSnafu};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use url::Url;

/// The key/value assertions found in the payload of a compact token.
///
/// Nothing about these claims was verified! They are fine for display purposes, but must never be
/// used to make authorization decisions.
///
/// All well-known claims are optional. Providers are free to omit them or to send values of a
/// different type, in which case the typed accessors simply return `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Accepts any JSON object. Other JSON values can not be claims.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => NotAnObjectSnafu.fail(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The claim stored under `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// (`name`) Full name of the user in displayable form.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// (`email`) Email address of the user.
    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// (`picture`) Url of the users profile picture, as sent.
    pub fn picture(&self) -> Option<&str> {
        self.get_str("picture")
    }

    /// The `picture` claim, parsed. Unparsable urls are treated as absent.
    pub fn picture_url(&self) -> Option<Url> {
        let picture = self.picture()?;
        Url::parse(picture)
            .inspect_err(|err| {
                tracing::warn!(?err, picture, "Token contained a non-parsable 'picture' url. Ignoring it.");
            })
            .ok()
    }

    /// (`sub`) Stable identifier of the user at the issuer.
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// (`iss`) Issuer of the token.
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// (`aud`) Audience(s) the token was issued for. Either a single string or a list of strings.
    pub fn audiences(&self) -> Option<Audiences> {
        match self.0.get("aud")? {
            Value::String(single) => Some(Audiences::Single(single.clone())),
            Value::Array(values) => values
                .iter()
                .map(|it| it.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Audiences::Multiple),
            _ => None,
        }
    }

    /// (`exp`) Point in time the token expires.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.timestamp("exp")
    }

    /// (`iat`) Point in time the token was issued.
    pub fn issued_at(&self) -> Option<OffsetDateTime> {
        self.timestamp("iat")
    }

    fn timestamp(&self, key: &str) -> Option<OffsetDateTime> {
        let value = self.0.get(key)?;
        let seconds = value
            .as_i64()
            .or_else(|| value.as_f64().map(|it| it.trunc() as i64))?;
        OffsetDateTime::from_unix_timestamp(seconds)
            .inspect_err(|err| {
                tracing::warn!(?err, key, "Token contained a non-parsable timestamp. Ignoring it.");
            })
            .ok()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Represents the audience(s) (`aud` claim) of a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Audiences {
    /// A single audience value (common case).
    Single(String),

    /// Multiple audience values.
    Multiple(Vec<String>),
}

impl Audiences {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audiences::Single(single) => single == audience,
            Audiences::Multiple(multiple) => multiple.iter().any(|it| it == audience),
        }
    }
}
