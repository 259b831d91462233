use serde::{Deserialize, Serialize};

/// Configuration of the two login widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialLoginOptions {
    pub google: GoogleOptions,
    pub facebook: FacebookOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleOptions {
    /// OAuth client id from the Google Cloud Console. The sign-in button will not work without it.
    pub client_id: String,

    /// Whether to show the One Tap prompt next to the sign-in button.
    /// Defaults to `true`.
    pub one_tap: bool,
}

impl Default for GoogleOptions {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            one_tap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookOptions {
    /// App id from developers.facebook.com.
    pub app_id: String,

    /// Comma separated profile fields queried after login.
    /// Defaults to `"name,picture"`.
    pub fields: String,

    /// Comma separated permissions requested on login.
    /// Defaults to `"public_profile"`.
    pub scope: String,

    /// Graph API version passed to `FB.init`.
    /// Defaults to `"v19.0"`.
    pub version: String,
}

impl Default for FacebookOptions {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            fields: "name,picture".to_owned(),
            scope: "public_profile".to_owned(),
            version: "v19.0".to_owned(),
        }
    }
}

impl SocialLoginOptions {
    /// Defaults, overwritten by `GOOGLE_CLIENT_ID`, `GOOGLE_ONE_TAP`, `FACEBOOK_APP_ID`, `FACEBOOK_FIELDS`,
    /// `FACEBOOK_SCOPE` and `FACEBOOK_API_VERSION` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        let var = |key: &str| lookup(key).filter(|it| !it.trim().is_empty());

        if let Some(client_id) = var("GOOGLE_CLIENT_ID") {
            options.google.client_id = client_id;
        }
        if let Some(one_tap) = var("GOOGLE_ONE_TAP") {
            match one_tap.trim().parse::<bool>() {
                Ok(one_tap) => options.google.one_tap = one_tap,
                Err(err) => {
                    tracing::warn!(?err, one_tap, "GOOGLE_ONE_TAP is neither 'true' nor 'false'. Ignoring it.");
                }
            }
        }
        if let Some(app_id) = var("FACEBOOK_APP_ID") {
            options.facebook.app_id = app_id;
        }
        if let Some(fields) = var("FACEBOOK_FIELDS") {
            options.facebook.fields = fields;
        }
        if let Some(scope) = var("FACEBOOK_SCOPE") {
            options.facebook.scope = scope;
        }
        if let Some(version) = var("FACEBOOK_API_VERSION") {
            options.facebook.version = version;
        }

        if options.google.client_id.is_empty() {
            tracing::warn!("GOOGLE_CLIENT_ID is not set. Google login will not work.");
        }
        if options.facebook.app_id.is_empty() {
            tracing::warn!("FACEBOOK_APP_ID is not set. Facebook login will not work.");
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let options = SocialLoginOptions::default();
        assert_that(options.google.client_id.as_str()).is_equal_to("");
        assert_that(options.google.one_tap).is_true();
        assert_that(options.facebook.fields.as_str()).is_equal_to("name,picture");
        assert_that(options.facebook.scope.as_str()).is_equal_to("public_profile");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars = HashMap::from([
            ("GOOGLE_CLIENT_ID", "123.apps.googleusercontent.com"),
            ("FACEBOOK_APP_ID", "2382420858843543"),
            ("GOOGLE_ONE_TAP", "false"),
            ("FACEBOOK_SCOPE", "  "),
        ]);
        let options =
            SocialLoginOptions::from_lookup(|key| vars.get(key).map(|it| (*it).to_owned()));

        assert_that(options.google.client_id.as_str()).is_equal_to("123.apps.googleusercontent.com");
        assert_that(options.facebook.app_id.as_str()).is_equal_to("2382420858843543");
        assert_that(options.facebook.fields.as_str()).is_equal_to("name,picture");
        assert_that(options.facebook.scope.as_str()).is_equal_to("public_profile");
        assert_that(options.google.one_tap).is_false();
    }

    #[test]
    fn invalid_one_tap_flag_keeps_default() {
        let options = SocialLoginOptions::from_lookup(|key| {
            (key == "GOOGLE_ONE_TAP").then(|| "sometimes".to_owned())
        });
        assert_that(options.google.one_tap).is_true();
    }
}
