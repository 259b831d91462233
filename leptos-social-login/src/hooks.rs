use crate::error::{LoginFailure, SocialLoginError};
use crate::profile::{LoginCredential, Profile};
use crate::provider::Provider;
use crate::social::ProfileSuccessResponse;
use crate::state::{LoginEvent, Transition, ViewState};
use leptos::prelude::*;

/// Reactive handle to the login state of one login view.
///
/// Provided as context by [`init_social_login`]. Use [`use_social_login`] in any component
/// rendered below the component that performed the `init_social_login` call.
///
/// All operations are plain event dispatches. They never panic and never block. Failures are
/// kept in `last_error` while the previous state stays in place.
#[derive(Debug, Clone, Copy)]
pub struct SocialLogin {
    /// The provider this login view was created for.
    pub provider: Provider,

    /// Current state. Single source of truth of all other signals.
    pub state: Signal<ViewState>,

    /// Derived signal stating `true` when a profile is present.
    pub is_logged_in: Signal<bool>,

    /// Derived signal holding the current profile, if logged in.
    pub profile: Signal<Option<Profile>>,

    /// Error produced by the last event. Cleared by any event handled without error.
    pub last_error: Signal<Option<SocialLoginError>>,

    dispatch: Callback<LoginEvent>,
}

impl SocialLogin {
    /// Feed an event into the state machine.
    ///
    /// Widgets may report results after the view owning this state was removed, e.g. when a login
    /// popup is completed after switching providers. Such events are dropped.
    pub fn dispatch(&self, event: LoginEvent) {
        let event_name = event.name();
        if self.dispatch.try_run(event).is_none() {
            tracing::debug!(provider = %self.provider, event = event_name, "Login state already disposed. Dropping event.");
        }
    }

    /// To be called by a login widget on success.
    pub fn login_succeeded(&self, credential: LoginCredential) {
        self.dispatch(LoginEvent::LoginSucceeded(credential));
    }

    /// To be called by a login widget on failure.
    pub fn login_failed(&self, reason: impl Into<String>) {
        self.dispatch(LoginEvent::LoginFailed(LoginFailure::new(
            self.provider,
            reason,
        )));
    }

    /// To be called when additional profile fields were fetched after a social login.
    pub fn profile_fetched(&self, fields: ProfileSuccessResponse) {
        self.dispatch(LoginEvent::ProfileFetched(fields));
    }

    /// Forget the current profile. This does not end any session at the provider.
    pub fn logout(&self) {
        self.dispatch(LoginEvent::Logout);
    }
}

/// Creates the login state for `provider` and provides it as context.
pub fn init_social_login(provider: Provider) -> SocialLogin {
    tracing::trace!(%provider, "Initializing social login...");

    let (state, set_state) = signal(ViewState::idle());
    let (last_error, set_last_error) = signal::<Option<SocialLoginError>>(None);

    let dispatch = Callback::new(move |event: LoginEvent| {
        tracing::trace!(%provider, event = event.name(), "Handling login event");

        if let LoginEvent::LoginSucceeded(credential) = &event {
            if credential.provider() != provider {
                tracing::warn!(%provider, credential_provider = %credential.provider(), "Ignoring credential of another provider.");
                return;
            }
        }

        let is_login = matches!(event, LoginEvent::LoginSucceeded(_));
        let is_logout = matches!(event, LoginEvent::Logout);

        let Some(current) = state.try_get_untracked() else {
            return;
        };
        let Transition { state: next, error } = current.apply(event);

        match &error {
            Some(SocialLoginError::Decode { source }) => {
                tracing::warn!(%provider, ?source, "Could not decode credential. Staying logged out.");
            }
            Some(SocialLoginError::LoginFailed { failure }) => {
                tracing::error!(%provider, reason = %failure.reason, "Login failed.");
            }
            None if is_login => tracing::debug!(%provider, "Logged in."),
            None if is_logout => tracing::debug!(%provider, "Logged out."),
            None => {}
        }

        // Avoid notifying subscribers when nothing changed, e.g. on a failed login.
        if state.try_with_untracked(|current| *current != next) == Some(true) {
            set_state.try_set(next);
        }
        set_last_error.try_set(error);
    });

    let auth = SocialLogin {
        provider,
        state: state.into(),
        is_logged_in: Signal::derive(move || state.read().is_logged_in()),
        profile: Signal::derive(move || state.read().profile().cloned()),
        last_error: last_error.into(),
        dispatch,
    };

    // We guarantee that the SocialLogin state is provided as context.
    provide_context(auth);

    auth
}

/// Returns the `SocialLogin` provided by an `init_social_login` call further up the tree.
///
/// # Panics
/// When no `SocialLogin` context is available.
pub fn use_social_login() -> SocialLogin {
    expect_context::<SocialLogin>()
}

/// Like [`use_social_login`], returning `None` instead of panicking.
pub fn try_use_social_login() -> Option<SocialLogin> {
    use_context::<SocialLogin>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::CompactToken;
    use assertr::prelude::*;

    const ALICE: &str = "eyJhbGciOiJIUzI1NiJ9.eyJuYW1lIjoiQWxpY2UiLCJlbWFpbCI6ImFAYi5jb20ifQ.sig";

    #[test]
    fn provides_context() {
        let owner = Owner::new();
        owner.with(|| {
            assert_that(try_use_social_login().is_none()).is_true();
            let login = init_social_login(Provider::Google);
            assert_that(use_social_login().provider).is_equal_to(login.provider);
        });
    }

    #[test]
    fn signals_follow_events() {
        let owner = Owner::new();
        owner.with(|| {
            let login = init_social_login(Provider::Google);
            assert_that(login.is_logged_in.get_untracked()).is_false();

            login.login_succeeded(LoginCredential::CompactToken(CompactToken::new(ALICE)));
            assert_that(login.is_logged_in.get_untracked()).is_true();
            assert_that(login.profile.get_untracked().and_then(|it| it.email))
                .is_equal_to(Some("a@b.com".to_owned()));
            assert_that(login.last_error.get_untracked().is_none()).is_true();

            login.login_failed("popup closed");
            assert_that(login.is_logged_in.get_untracked()).is_true();
            assert_that(matches!(
                login.last_error.get_untracked(),
                Some(SocialLoginError::LoginFailed { .. })
            ))
            .is_true();

            login.logout();
            assert_that(login.is_logged_in.get_untracked()).is_false();
            assert_that(login.profile.get_untracked()).is_equal_to(None);
            assert_that(login.last_error.get_untracked().is_none()).is_true();
        });
    }

    #[test]
    fn broken_credential_is_reported() {
        let owner = Owner::new();
        owner.with(|| {
            let login = init_social_login(Provider::Google);
            login.login_succeeded(LoginCredential::CompactToken(CompactToken::new("garbage")));
            assert_that(login.is_logged_in.get_untracked()).is_false();
            assert_that(matches!(
                login.last_error.get_untracked(),
                Some(SocialLoginError::Decode { .. })
            ))
            .is_true();
        });
    }

    #[test]
    fn events_after_disposal_are_dropped() {
        let owner = Owner::new();
        let login = owner.with(|| init_social_login(Provider::Facebook));
        drop(owner);

        login.login_succeeded(LoginCredential::CompactToken(CompactToken::new(ALICE)));
        login.login_failed("popup closed");
        login.logout();

        assert_that(login.state.try_get_untracked().is_none()).is_true();
    }

    #[test]
    fn credentials_of_another_provider_are_ignored() {
        let owner = Owner::new();
        owner.with(|| {
            let login = init_social_login(Provider::Facebook);
            login.login_succeeded(LoginCredential::CompactToken(CompactToken::new(ALICE)));
            assert_that(login.is_logged_in.get_untracked()).is_false();
            assert_that(login.last_error.get_untracked().is_none()).is_true();
        });
    }
}
