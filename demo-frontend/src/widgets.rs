//! Thin bindings to the two hosted login widgets.
//!
//! Google's Identity Services script and Facebook's JS SDK are loaded by the page shell. Both only
//! exist in the browser, so everything touching them is compiled for the `hydrate` feature only.
//! Results are reported through the `SocialLogin` of the surrounding `SocialLoginProvider`.

use leptos::prelude::*;
use leptos_social_login::{FacebookOptions, GoogleOptions, use_social_login};

/// Renders Google's "Continue with Google" button into a placeholder element, and the One Tap
/// prompt when enabled.
///
/// The Identity Services script is loaded asynchronously and may arrive after hydration. Rendering
/// then waits for its `onGoogleLibraryLoad` hook.
#[component]
pub fn GoogleLoginButton(options: GoogleOptions) -> impl IntoView {
    let login = use_social_login();
    let container = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        let Some(_el) = container.get() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        gsi::render_when_loaded(_el.into(), options.clone(), login);
        #[cfg(not(feature = "hydrate"))]
        let _ = (&options, login);
    });

    view! {
        <div id="google-login" class="google-login" node_ref=container></div>
    }
}

/// What to do with the Google button, given what is known about the Identity Services script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryLoad {
    /// The script already ran. Render right away.
    Render,

    /// The page is still loading. Render once the script announces itself.
    Wait,

    /// The page finished loading without the script. It was blocked or failed to download.
    Fail,
}

impl LibraryLoad {
    pub fn decide(library_loaded: bool, page_loaded: bool) -> Self {
        match (library_loaded, page_loaded) {
            (true, _) => LibraryLoad::Render,
            (false, false) => LibraryLoad::Wait,
            (false, true) => LibraryLoad::Fail,
        }
    }
}

/// Our own "Continue with Facebook" button, opening the SDK's login dialog on click.
#[component]
pub fn FacebookLoginButton(options: FacebookOptions) -> impl IntoView {
    let login = use_social_login();

    let on_click = move |_| {
        #[cfg(feature = "hydrate")]
        if let Err(err) = fb::login(&options, login) {
            tracing::error!(?err, "Could not open the Facebook login dialog.");
            login.login_failed("facebookNotLoaded");
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&options, login);
    };

    view! {
        <button id="facebook-login" class="facebook-login" on:click=on_click>
            "Continue with Facebook"
        </button>
    }
}

#[cfg(feature = "hydrate")]
mod gsi {
    use super::LibraryLoad;
    use leptos_social_login::{CompactToken, GoogleOptions, LoginCredential, SocialLogin};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize, catch)]
        fn initialize(config: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = renderButton, catch)]
        fn render_button(parent: &JsValue, options: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = prompt, catch)]
        fn prompt() -> Result<(), JsValue>;
    }

    fn get(target: &JsValue, key: &str) -> JsValue {
        js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
    }

    fn library_loaded() -> bool {
        let google = get(&js_sys::global(), "google");
        !get(&get(&google, "accounts"), "id").is_undefined()
    }

    fn page_loaded() -> bool {
        get(&get(&js_sys::global(), "document"), "readyState").as_string().as_deref() == Some("complete")
    }

    fn not_loaded(login: SocialLogin) {
        tracing::error!("Google Identity Services script did not load.");
        login.login_failed("googleNotLoaded");
    }

    pub(super) fn render_when_loaded(parent: JsValue, options: GoogleOptions, login: SocialLogin) {
        match LibraryLoad::decide(library_loaded(), page_loaded()) {
            LibraryLoad::Render => show(&parent, &options, login),
            LibraryLoad::Fail => not_loaded(login),
            LibraryLoad::Wait => {
                if let Err(err) = wait_for_library(parent, options, login) {
                    tracing::error!(?err, "Could not wait for the Google Identity Services script.");
                    not_loaded(login);
                }
            }
        }
    }

    /// See: <https://developers.google.com/identity/gsi/web/reference/js-reference#onGoogleLibraryLoad>
    fn wait_for_library(
        parent: JsValue,
        options: GoogleOptions,
        login: SocialLogin,
    ) -> Result<(), JsValue> {
        let global = js_sys::global();

        let on_library_load = Closure::once_into_js(move || show(&parent, &options, login));
        js_sys::Reflect::set(&global, &"onGoogleLibraryLoad".into(), &on_library_load)?;

        // Async scripts have run (or failed) by the time the page `load` event fires.
        let on_page_load = Closure::once_into_js(move || {
            if !library_loaded() {
                not_loaded(login);
            }
        });
        let add_event_listener = get(&global, "addEventListener").dyn_into::<js_sys::Function>()?;
        add_event_listener.call2(&global, &"load".into(), &on_page_load)?;
        Ok(())
    }

    fn show(parent: &JsValue, options: &GoogleOptions, login: SocialLogin) {
        if let Err(err) = render(parent, options, login) {
            tracing::error!(?err, "Could not render the Google sign-in button.");
            login.login_failed("googleNotLoaded");
        }
    }

    /// See: <https://developers.google.com/identity/gsi/web/reference/js-reference>
    fn render(parent: &JsValue, options: &GoogleOptions, login: SocialLogin) -> Result<(), JsValue> {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
            let credential = get(&response, "credential")
                .as_string()
                .filter(|it| !it.is_empty());
            match credential {
                Some(token) => {
                    login.login_succeeded(LoginCredential::CompactToken(CompactToken::new(token)))
                }
                None => login.login_failed("No credential in response"),
            }
        })
        .into_js_value();

        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"client_id".into(), &options.client_id.as_str().into())?;
        js_sys::Reflect::set(&config, &"callback".into(), &callback)?;
        initialize(&config)?;

        let button = js_sys::Object::new();
        js_sys::Reflect::set(&button, &"theme".into(), &"outline".into())?;
        js_sys::Reflect::set(&button, &"size".into(), &"large".into())?;
        js_sys::Reflect::set(&button, &"text".into(), &"continue_with".into())?;
        js_sys::Reflect::set(&button, &"shape".into(), &"rectangular".into())?;
        render_button(parent, &button)?;

        // The button stays usable when One Tap is suppressed or fails.
        if options.one_tap {
            if let Err(err) = prompt() {
                tracing::warn!(?err, "Could not show the One Tap prompt.");
            }
        }
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
mod fb {
    use leptos_social_login::{
        FacebookOptions, GraphApiResponse, LoginCredential, LoginStatusResponse, SocialLogin,
    };
    use serde::de::DeserializeOwned;
    use std::sync::atomic::{AtomicBool, Ordering};
    use wasm_bindgen::prelude::*;

    static INITIALIZED: AtomicBool = AtomicBool::new(false);

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = FB, js_name = init, catch)]
        fn init(params: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = FB, js_name = login, catch)]
        fn fb_login(callback: &JsValue, options: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = FB, js_name = api, catch)]
        fn api(path: &str, params: &JsValue, callback: &JsValue) -> Result<(), JsValue>;
    }

    fn parse<T: DeserializeOwned>(value: &JsValue) -> Option<T> {
        let json = js_sys::JSON::stringify(value).ok()?;
        match serde_json::from_str::<T>(&String::from(json)) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(?err, "Unexpected response from the Facebook SDK.");
                None
            }
        }
    }

    fn ensure_initialized(options: &FacebookOptions) -> Result<(), JsValue> {
        if INITIALIZED.load(Ordering::Acquire) {
            return Ok(());
        }
        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"appId".into(), &options.app_id.as_str().into())?;
        js_sys::Reflect::set(&params, &"version".into(), &options.version.as_str().into())?;
        js_sys::Reflect::set(&params, &"cookie".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&params, &"xfbml".into(), &JsValue::FALSE)?;
        init(&params)?;
        INITIALIZED.store(true, Ordering::Release);
        Ok(())
    }

    fn fetch_profile(fields: &str, login: SocialLogin) -> Result<(), JsValue> {
        let callback = Closure::once_into_js(move |response: JsValue| {
            match parse::<GraphApiResponse>(&response).map(GraphApiResponse::into_result) {
                Some(Ok(fields)) => login.profile_fetched(fields),
                Some(Err(error)) => {
                    tracing::warn!(?error, "Could not query profile fields.");
                }
                None => {}
            }
        });
        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"fields".into(), &fields.into())?;
        api("/me", &params, &callback)
    }

    /// See: <https://developers.facebook.com/docs/reference/javascript/FB.login/>
    pub(super) fn login(options: &FacebookOptions, login: SocialLogin) -> Result<(), JsValue> {
        ensure_initialized(options)?;

        let fields = options.fields.clone();
        let callback = Closure::once_into_js(move |response: JsValue| {
            let Some(response) = parse::<LoginStatusResponse>(&response) else {
                login.login_failed("unreadableResponse");
                return;
            };
            let credential = response
                .auth_response
                .and_then(LoginCredential::from_social_success);
            match credential {
                Some(credential) => {
                    login.login_succeeded(credential);
                    if let Err(err) = fetch_profile(&fields, login) {
                        tracing::warn!(?err, "Could not query profile fields.");
                    }
                }
                None => login.login_failed(response.status),
            }
        });

        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"scope".into(), &options.scope.as_str().into())?;
        js_sys::Reflect::set(&params, &"return_scopes".into(), &JsValue::TRUE)?;
        fb_login(&callback, &params)
    }
}
