use serde::{Deserialize, Serialize};
use std::fmt;

/// The login providers a user can choose between.
///
/// `Google` is a federated identity provider handing out compact ID tokens (JWTs).
/// `Facebook` is a social network login handing out an opaque access token alongside already parsed
/// profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Provider {
    #[default]
    Google,
    Facebook,
}

impl Provider {
    /// All providers, in the order they should be offered to the user.
    pub const ALL: [Provider; 2] = [Provider::Facebook, Provider::Google];

    /// Human-readable name of the provider.
    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Facebook => "Facebook",
        }
    }

    /// Stable, lowercase identifier. Usable in element ids and css classes.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }

    /// How the raw token of this provider should be named when shown to the user.
    pub fn token_label(self) -> &'static str {
        match self {
            Provider::Google => "JWT Token",
            Provider::Facebook => "Access Token",
        }
    }

    /// Number of characters of the raw token shown in previews.
    pub fn token_preview_len(self) -> usize {
        match self {
            Provider::Google => 30,
            Provider::Facebook => 20,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
