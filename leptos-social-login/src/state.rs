use crate::error::{LoginFailure, SocialLoginError};
use crate::profile::{LoginCredential, Profile};
use crate::provider::Provider;
use crate::social::ProfileSuccessResponse;

/// Everything a login widget (or the user) can tell the view controller.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    LoginSucceeded(LoginCredential),
    LoginFailed(LoginFailure),

    /// Additional profile fields arrived after a successful social login.
    ProfileFetched(ProfileSuccessResponse),

    Logout,
}

impl LoginEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LoginEvent::LoginSucceeded(_) => "login_succeeded",
            LoginEvent::LoginFailed(_) => "login_failed",
            LoginEvent::ProfileFetched(_) => "profile_fetched",
            LoginEvent::Logout => "logout",
        }
    }
}

/// Login state of a single login view.
///
/// Either idle (`is_logged_in() == false`, no profile) or logged in with a profile. Values are
/// never mutated in place. Every event produces a new state through [`ViewState::apply`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    profile: Option<Profile>,
}

/// Result of applying a [`LoginEvent`].
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ViewState,

    /// Set when the event could not be handled. `state` then equals the previous state.
    pub error: Option<SocialLoginError>,
}

impl Transition {
    fn to(state: ViewState) -> Self {
        Self { state, error: None }
    }

    fn rejected(state: ViewState, error: SocialLoginError) -> Self {
        Self {
            state,
            error: Some(error),
        }
    }
}

impl ViewState {
    pub fn idle() -> Self {
        Self { profile: None }
    }

    pub fn logged_in(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The provider the current profile came from, if logged in.
    pub fn provider(&self) -> Option<Provider> {
        self.profile.as_ref().map(|it| it.provider)
    }

    /// The one and only state update function.
    ///
    /// - A successful login yields a logged-in state, replacing any previous profile. If the
    ///   credential does not decode, the previous state is kept and a decode error reported.
    /// - A failed login keeps the previous state and reports the failure.
    /// - Fetched profile fields are merged into a current Facebook profile. Ignored otherwise.
    /// - Logout yields the idle state.
    pub fn apply(self, event: LoginEvent) -> Transition {
        match event {
            LoginEvent::LoginSucceeded(credential) => match Profile::from_credential(credential) {
                Ok(profile) => Transition::to(ViewState::logged_in(profile)),
                Err(source) => Transition::rejected(self, SocialLoginError::Decode { source }),
            },
            LoginEvent::LoginFailed(failure) => {
                Transition::rejected(self, SocialLoginError::LoginFailed { failure })
            }
            LoginEvent::ProfileFetched(fields) => match self.profile {
                Some(mut profile) if profile.provider == Provider::Facebook => {
                    profile.merge_social_fields(&fields);
                    Transition::to(ViewState::logged_in(profile))
                }
                profile => {
                    tracing::trace!("Ignoring profile fields, not logged in through Facebook");
                    Transition::to(ViewState { profile })
                }
            },
            LoginEvent::Logout => Transition::to(ViewState::idle()),
        }
    }
}
