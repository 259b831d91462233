//! Google and Facebook sign-in state for Leptos applications.
//!
//! The login widgets of both providers are external. This crate only keeps track of what they
//! report: it decodes the ID token handed out by Google (WITHOUT verifying it, display only!),
//! takes the profile fields handed out by Facebook as they are, and exposes the resulting
//! [`Profile`] through reactive signals.
//!
//! ```
//! use leptos::prelude::*;
//! use leptos_social_login::{
//!     Provider,
//!     components::{LoggedIn, LoggedOut, LogoutButton, ProfileCard, ProviderToggle, SocialLoginProvider},
//! };
//!
//! #[component]
//! pub fn App() -> impl IntoView {
//!     let selected = RwSignal::new(Provider::default());
//!
//!     view! {
//!         <ProviderToggle selected=selected/>
//!         { move || {
//!             let provider = selected.get();
//!             view! {
//!                 <SocialLoginProvider provider=provider>
//!                     <LoggedOut>
//!                         // Render the login widget of `provider` here. Report its results
//!                         // through `use_social_login().login_succeeded(..)` / `login_failed(..)`.
//!                         <p>"Sign in with " { provider.label() }</p>
//!                     </LoggedOut>
//!                     <LoggedIn children=|_profile| view! {
//!                         <ProfileCard/>
//!                         <LogoutButton/>
//!                     }/>
//!                 </SocialLoginProvider>
//!             }
//!         }}
//!     }
//! }
//! ```

pub mod components;
mod claims;
mod config;
mod credential;
mod error;
mod hooks;
mod profile;
mod provider;
mod social;
mod state;

// Library exports (additional to pub modules).
pub use claims::*;
pub use config::*;
pub use credential::{CompactToken, decode_claims};
pub use error::*;
pub use hooks::*;
pub use profile::*;
pub use provider::*;
pub use social::*;
pub use state::*;
pub mod url {
    pub use url::Url;
}
