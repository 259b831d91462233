use crate::error::SocialLoginError;
use crate::hooks::{init_social_login, use_social_login};
use crate::profile::Profile;
use crate::provider::Provider;
use leptos::either::Either;
use leptos::prelude::*;

/// Initialize the login state of one provider and provide it to child components.
///
/// Every instance owns an independent state. Dropping the view (e.g. when the user switches to the
/// other provider) drops its state as well.
///
/// # Example
/// ```no_run
/// use leptos::prelude::*;
/// use leptos_social_login::Provider;
/// use leptos_social_login::components::{LoggedIn, LoggedOut, SocialLoginProvider};
///
/// # #[component]
/// # fn Example() -> impl IntoView {
/// view! {
///     <SocialLoginProvider provider=Provider::Google>
///         <LoggedOut>
///             <p>"Please sign in."</p>
///         </LoggedOut>
///         <LoggedIn children=|profile| view! { <p>"Hello, " { profile.display_name().to_owned() }</p> }/>
///     </SocialLoginProvider>
/// }
/// # }
/// ```
#[allow(clippy::must_use_candidate)]
#[component]
pub fn SocialLoginProvider(provider: Provider, children: Children) -> impl IntoView {
    let _login = init_social_login(provider);

    view! {
        { children() }
    }
}

/// Show `children` only while logged in, handing them the current [`Profile`].
///
/// Children are rendered anew whenever the profile changes, e.g. when additional profile fields
/// arrive after a Facebook login.
#[component(transparent)]
#[allow(clippy::must_use_candidate)]
pub fn LoggedIn<C, V>(children: C) -> impl IntoView
where
    C: Fn(Profile) -> V + 'static + Send,
    V: IntoView + 'static,
{
    let login = use_social_login();

    move || login.profile.get().map(&children)
}

/// Show `children` only while logged out.
#[component(transparent)]
#[allow(clippy::must_use_candidate)]
pub fn LoggedOut(children: ChildrenFn) -> impl IntoView {
    let login = use_social_login();

    move || (!login.is_logged_in.get()).then(|| children())
}

/// Render different content based on the login state.
#[component(transparent)]
#[allow(clippy::must_use_candidate)]
pub fn MaybeLoggedIn<FL, FO, VL, VO>(
    /// View provider for when the user is logged in.
    logged_in: FL,

    /// View provider for when the user is logged out.
    logged_out: FO,
) -> impl IntoView
where
    FL: Fn(Profile) -> VL + 'static + Send,
    FO: Fn() -> VO + 'static + Send,
    VL: IntoView + 'static,
    VO: IntoView + 'static,
{
    let login = use_social_login();

    move || match login.profile.get() {
        Some(profile) => Either::<AnyView, AnyView>::Left(logged_in(profile).into_any()),
        None => Either::<AnyView, AnyView>::Right(logged_out().into_any()),
    }
}

/// One button per provider. Clicking a button selects its provider.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn ProviderToggle(selected: RwSignal<Provider>) -> impl IntoView {
    view! {
        <span class="provider-toggle">
            {Provider::ALL
                .into_iter()
                .map(|provider| {
                    view! {
                        <button
                            id=format!("select-{}", provider.id())
                            class="provider-toggle-button"
                            class:active=move || selected.get() == provider
                            on:click=move |_| selected.set(provider)
                        >
                            {provider.label()}
                        </button>
                    }
                })
                .collect_view()}
        </span>
    }
}

/// Picture, name, email, id and token preview of the logged-in user. Renders nothing while logged
/// out.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn ProfileCard() -> impl IntoView {
    let login = use_social_login();

    move || {
        login.profile.get().map(|profile| {
            let name = profile.display_name().to_owned();
            let picture = profile.picture.as_ref().map(|url| {
                view! {
                    <img class="profile-picture" src=url.to_string() alt=name.clone()/>
                }
            });
            let email = profile
                .email
                .clone()
                .map(|email| view! { <p id="profile-email" class="profile-email">{email}</p> });
            let subject_id = profile.subject_id.clone().unwrap_or_default();
            let token_label = profile.provider.token_label();
            let token_preview = profile.token_preview();

            view! {
                <div class="profile-card">
                    {picture}
                    <div class="profile-details">
                        <h3 id="profile-name" class="profile-name">{name}</h3>
                        {email}
                        <p id="profile-id" class="profile-id">"ID: " {subject_id}</p>
                    </div>
                </div>
                <div class="login-success">
                    <p>"Successfully logged in with " {profile.provider.label()} "!"</p>
                    <p id="token-preview" class="token-preview">{token_label} ": " {token_preview}</p>
                </div>
            }
        })
    }
}

/// Tells the user about the last failed login attempt, if any.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn LoginError() -> impl IntoView {
    let login = use_social_login();

    move || {
        login.last_error.get().map(|err| {
            let message = match err {
                SocialLoginError::Decode { .. } => {
                    "Could not read the sign-in response. Please try again.".to_owned()
                }
                SocialLoginError::LoginFailed { failure } => {
                    format!("{} login failed. Please try again.", failure.provider)
                }
            };
            view! { <p id="login-error" class="login-error">{message}</p> }
        })
    }
}

/// Logs the user out of this page. Does not end any session at the provider.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn LogoutButton() -> impl IntoView {
    let login = use_social_login();

    view! {
        <button id="logout" class="logout-button" on:click=move |_| login.logout()>
            "Logout"
        </button>
    }
}
