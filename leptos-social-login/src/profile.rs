use crate::claims::Claims;
use crate::credential::{self, CompactToken};
use crate::error::DecodeError;
use crate::provider::Provider;
use crate::social::{ProfileSuccessResponse, SuccessResponse};
use url::Url;

/// What a login widget hands us after a successful login.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginCredential {
    /// A raw compact token (ID token) which still has to be decoded. Google.
    CompactToken(CompactToken),

    /// Profile fields which were already parsed by the widget, plus an opaque access token.
    /// Facebook.
    SocialProfile(SocialProfile),
}

impl LoginCredential {
    pub fn provider(&self) -> Provider {
        match self {
            LoginCredential::CompactToken(_) => Provider::Google,
            LoginCredential::SocialProfile(_) => Provider::Facebook,
        }
    }

    /// A successful social login only counts when it carries an access token.
    pub fn from_social_success(response: SuccessResponse) -> Option<Self> {
        let access_token = response.access_token.filter(|it| !it.is_empty())?;
        Some(LoginCredential::SocialProfile(SocialProfile {
            access_token,
            user_id: response.user_id,
            fields: ProfileSuccessResponse::default(),
        }))
    }
}

impl From<CompactToken> for LoginCredential {
    fn from(token: CompactToken) -> Self {
        LoginCredential::CompactToken(token)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialProfile {
    /// Opaque. We never look into it.
    pub access_token: String,
    pub user_id: Option<String>,
    pub fields: ProfileSuccessResponse,
}

/// Who the user signed in as. Display-only, lives as long as the current page does.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub provider: Provider,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<Url>,

    /// `sub` claim for Google, the app scoped user id for Facebook.
    pub subject_id: Option<String>,

    /// The compact token (Google) or access token (Facebook) this profile was built from.
    pub raw_token: String,
}

impl Profile {
    /// Normalizes both kinds of credentials. Only compact tokens can fail, when their payload does
    /// not decode.
    pub fn from_credential(credential: LoginCredential) -> Result<Self, DecodeError> {
        match credential {
            LoginCredential::CompactToken(token) => {
                let claims = token.claims()?;
                Ok(Self::from_claims(&claims, token))
            }
            LoginCredential::SocialProfile(social) => Ok(Self::from_social(social)),
        }
    }

    fn from_claims(claims: &Claims, token: CompactToken) -> Self {
        Self {
            provider: Provider::Google,
            name: claims.name().map(str::to_owned),
            email: claims.email().map(str::to_owned),
            picture: claims.picture_url(),
            subject_id: claims.subject().map(str::to_owned),
            raw_token: token.into_string(),
        }
    }

    fn from_social(social: SocialProfile) -> Self {
        let mut profile = Self {
            provider: Provider::Facebook,
            name: None,
            email: None,
            picture: None,
            subject_id: social.user_id,
            raw_token: social.access_token,
        };
        profile.merge_social_fields(&social.fields);
        profile
    }

    /// Takes over all fields present in `fields`. The user id received on login wins over the
    /// profile `id`.
    pub fn merge_social_fields(&mut self, fields: &ProfileSuccessResponse) {
        fn take(target: &mut Option<String>, value: Option<&String>) {
            if let Some(value) = value.filter(|it| !it.is_empty()) {
                *target = Some(value.clone());
            }
        }
        take(&mut self.name, fields.name.as_ref());
        take(&mut self.email, fields.email.as_ref());
        if self.subject_id.is_none() {
            take(&mut self.subject_id, fields.id.as_ref());
        }
        if let Some(picture) = fields.picture_url() {
            match Url::parse(picture) {
                Ok(url) => self.picture = Some(url),
                Err(err) => {
                    tracing::warn!(?err, picture, "Profile contained a non-parsable picture url. Ignoring it.");
                }
            }
        }
    }

    /// The name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|it| !it.is_empty())
            .unwrap_or("User")
    }

    /// Beginning of the raw token, for display. Never show the whole credential.
    pub fn token_preview(&self) -> String {
        credential::preview(&self.raw_token, self.provider.token_preview_len())
    }
}
