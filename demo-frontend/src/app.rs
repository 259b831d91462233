use crate::widgets::{FacebookLoginButton, GoogleLoginButton};
use leptos::either::Either;
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_social_login::components::{
    LoggedIn, LoggedOut, LoginError, LogoutButton, ProfileCard, ProviderToggle,
    SocialLoginProvider,
};
use leptos_social_login::{FacebookOptions, GoogleOptions, Provider, SocialLoginOptions};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src="https://accounts.google.com/gsi/client" async defer></script>
                <script src="https://connect.facebook.net/en_US/sdk.js" async defer crossorigin="anonymous"></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[server]
async fn get_social_login_options() -> Result<SocialLoginOptions, ServerFnError> {
    Ok(SocialLoginOptions::from_env())
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let selected = RwSignal::new(Provider::default());
    let options = LocalResource::new(|| async move {
        get_social_login_options().await.unwrap_or_else(|err| {
            tracing::error!(?err, "Could not load login options. Widgets stay unconfigured.");
            SocialLoginOptions::default()
        })
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/demo-frontend.css"/>
        <Title text="Social Login Demo"/>

        <main>
            <ProviderToggle selected=selected/>

            <Suspense fallback=|| view! { "loading..." }>
                {Suspend::new(async move {
                    let options = options.await;
                    move || match selected.get() {
                        Provider::Google => Either::Left(view! {
                            <GoogleCard options=options.google.clone()/>
                        }),
                        Provider::Facebook => Either::Right(view! {
                            <FacebookCard options=options.facebook.clone()/>
                        }),
                    }
                })}
            </Suspense>
        </main>
    }
}

#[component]
fn Card(provider: Provider, children: Children) -> impl IntoView {
    view! {
        <div class="card" id=format!("{}-card", provider.id())>
            <div class="card-header">
                <h1>{provider.label()} " Login Demo"</h1>
                <p>"Sign in with your " {provider.label()} " account"</p>
            </div>
            {children()}
        </div>
    }
}

#[component]
fn LoggedInView() -> impl IntoView {
    view! {
        <LoggedIn children=|_profile| view! {
            <ProfileCard/>
            <LogoutButton/>
        }/>
    }
}

#[component]
pub fn GoogleCard(options: GoogleOptions) -> impl IntoView {
    view! {
        <SocialLoginProvider provider=Provider::Google>
            <Card provider=Provider::Google>
                <LoggedOut>
                    <GoogleLoginButton options=options.clone()/>
                    <LoginError/>
                    <div class="setup-instructions">
                        <p><strong>"Setup Instructions:"</strong></p>
                        <ol>
                            <li>"Get a Client ID from the Google Cloud Console"</li>
                            <li>"Add GOOGLE_CLIENT_ID to your .env file"</li>
                            <li>"Configure authorized origins in the Google Cloud Console"</li>
                        </ol>
                    </div>
                </LoggedOut>
                <LoggedInView/>
                <div class="card-footer">
                    <h4>"What you get:"</h4>
                    <ul>
                        <li>"User's full name"</li>
                        <li>"Email address (verified)"</li>
                        <li>"Profile picture"</li>
                        <li>"Google user ID"</li>
                        <li>"JWT credential token"</li>
                    </ul>
                </div>
            </Card>
        </SocialLoginProvider>
    }
}

#[component]
pub fn FacebookCard(options: FacebookOptions) -> impl IntoView {
    view! {
        <SocialLoginProvider provider=Provider::Facebook>
            <Card provider=Provider::Facebook>
                <LoggedOut>
                    <FacebookLoginButton options=options.clone()/>
                    <LoginError/>
                    <div class="setup-instructions">
                        <p><strong>"Setup Instructions:"</strong></p>
                        <ol>
                            <li>"Create a Facebook App at developers.facebook.com"</li>
                            <li>"Add FACEBOOK_APP_ID to your .env file"</li>
                            <li>"Add yourself as Admin, Developer or Tester in Roles"</li>
                        </ol>
                    </div>
                </LoggedOut>
                <LoggedInView/>
            </Card>
        </SocialLoginProvider>
    }
}
