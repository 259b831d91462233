//! Payloads handed out by the Facebook JS SDK.
//!
//! See: <https://developers.facebook.com/docs/reference/javascript/FB.login/>

use serde::{Deserialize, Serialize};

/// Response of `FB.login` / `FB.getLoginStatus`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatusResponse {
    /// One of `connected`, `not_authorized` or `unknown`.
    pub status: String,

    /// Only present when `status` is `connected`.
    #[serde(default)]
    pub auth_response: Option<SuccessResponse>,
}

/// The `authResponse` part of a successful login.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    /// Opaque access token. Login only counts as successful if this is present.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Seconds until `access_token` expires.
    #[serde(default)]
    pub expires_in: Option<i64>,

    #[serde(default, rename = "reauthorize_required_in")]
    pub reauthorize_required_in: Option<i64>,

    #[serde(default)]
    pub signed_request: Option<String>,

    /// Id of the user, scoped to the app.
    #[serde(default, rename = "userID")]
    pub user_id: Option<String>,

    #[serde(default)]
    pub graph_domain: Option<String>,

    /// Unix timestamp at which data access for the app expires.
    #[serde(default, rename = "data_access_expiration_time")]
    pub data_access_expiration_time: Option<i64>,
}

/// Profile fields queried through `FB.api("/me", { fields })` after a successful login.
///
/// Which fields are present depends on the requested `fields` and granted permissions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ProfileSuccessResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub picture: Option<Picture>,
}

impl ProfileSuccessResponse {
    pub fn picture_url(&self) -> Option<&str> {
        self.picture.as_ref().map(|it| it.data.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Picture {
    pub data: PictureData,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PictureData {
    pub url: String,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub is_silhouette: Option<bool>,
}

/// Reported when the login did not succeed, e.g. `loginCancelled` or `facebookNotLoaded`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FailResponse {
    pub status: String,
}

/// Response of `FB.api("/me", { fields })`. The Graph API reports failures in-band.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GraphApiResponse {
    Error { error: GraphApiError },
    Profile(ProfileSuccessResponse),
}

/// See: <https://developers.facebook.com/docs/graph-api/guides/error-handling/>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

impl GraphApiResponse {
    pub fn into_result(self) -> Result<ProfileSuccessResponse, GraphApiError> {
        match self {
            GraphApiResponse::Error { error } => Err(error),
            GraphApiResponse::Profile(profile) => Ok(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;

    #[test]
    fn deserialize_connected_login_status() {
        let json = r#"{
            "status": "connected",
            "authResponse": {
                "accessToken": "EAAG123",
                "expiresIn": 5183999,
                "signedRequest": "abc.def",
                "userID": "10223",
                "graphDomain": "facebook",
                "reauthorize_required_in": 7776000,
                "data_access_expiration_time": 1700000000
            }
        }"#;
        let parsed = serde_json::from_str::<LoginStatusResponse>(json).unwrap();
        let auth = parsed.auth_response.unwrap();
        assert_that(parsed.status).is_equal_to("connected".to_owned());
        assert_that(auth.access_token).is_equal_to(Some("EAAG123".to_owned()));
        assert_that(auth.user_id).is_equal_to(Some("10223".to_owned()));
        assert_that(auth.data_access_expiration_time).is_equal_to(Some(1_700_000_000));
        assert_that(auth.reauthorize_required_in).is_equal_to(Some(7_776_000));
    }

    #[test]
    fn deserialize_unknown_login_status() {
        let parsed =
            serde_json::from_str::<LoginStatusResponse>(r#"{ "status": "unknown", "authResponse": null }"#)
                .unwrap();
        assert_that(parsed.auth_response).is_equal_to(None);
    }

    #[test]
    fn deserialize_profile_with_picture() {
        let json = r#"{
            "id": "10223",
            "name": "Alice",
            "picture": { "data": { "height": 50, "is_silhouette": false, "url": "https://example.com/a.jpg", "width": 50 } }
        }"#;
        let parsed = serde_json::from_str::<ProfileSuccessResponse>(json).unwrap();
        assert_that(parsed.picture_url()).is_equal_to(Some("https://example.com/a.jpg"));
        assert_that(parsed.email).is_equal_to(None);
    }

    #[test]
    fn graph_api_error_is_not_a_profile() {
        let json = r#"{
            "error": {
                "message": "Invalid OAuth access token.",
                "type": "OAuthException",
                "code": 190,
                "fbtrace_id": "AbCdEf"
            }
        }"#;
        let err = serde_json::from_str::<GraphApiResponse>(json)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_that(err.kind).is_equal_to(Some("OAuthException".to_owned()));
        assert_that(err.code).is_equal_to(Some(190));
    }

    #[test]
    fn graph_api_profile() {
        let json = r#"{ "id": "10223", "name": "Alice" }"#;
        let profile = serde_json::from_str::<GraphApiResponse>(json)
            .unwrap()
            .into_result()
            .unwrap();
        assert_that(profile.name).is_equal_to(Some("Alice".to_owned()));
    }
}
