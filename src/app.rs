use dioxus::prelude::*;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    domain::{CurrentUser, SellWizard, Session},
    infra::api::{ApiClient, ApiError},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{SellPage, SettingsPage, SignInPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{LocalStore, AUTH_TOKEN_KEY, CURRENT_USER_KEY},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Sell {},
    #[route("/sign-in")]
    SignIn {},
    #[route("/settings")]
    Settings {},
}

/// Long-lived collaborators built once in `main` and shared via context.
#[derive(Clone)]
pub struct AppServices {
    pub store: LocalStore,
    pub client: ApiClient,
}

impl AppServices {
    pub fn init(config: AppConfig) -> Result<Self, ApiError> {
        let store = match config.data_dir {
            Some(dir) => LocalStore::at(dir),
            None => LocalStore::open_default().unwrap_or_else(|err| {
                warn!("Config directory unavailable ({err}); storing data next to the app.");
                LocalStore::at(".device-buyback")
            }),
        };
        info!("Local store at {}", store.root().display());

        let client = ApiClient::with_base_url(&config.api_base_url)?;
        info!("Backend at {}", client.base_url());

        Ok(Self { store, client })
    }

    /// Picks up the credential and profile saved by a previous sign-in.
    pub fn restore_session(&self) -> Session {
        let token = self.store.get::<String>(AUTH_TOKEN_KEY);
        let user = self.store.get::<CurrentUser>(CURRENT_USER_KEY);
        match (token, user) {
            (Some(token), Some(user)) => {
                self.client.set_credential(token);
                info!("Restored session for user {}", user.id);
                Session::signed_in(user)
            }
            _ => Session::default(),
        }
    }

    pub async fn sign_in(&self, token: &str) -> Result<CurrentUser, ApiError> {
        self.client.set_credential(token.trim());
        match self.client.fetch_profile().await {
            Ok(user) => {
                if let Err(err) = self.store.set(AUTH_TOKEN_KEY, token.trim()) {
                    warn!("Failed to persist credential: {err}");
                }
                if let Err(err) = self.store.set(CURRENT_USER_KEY, &user) {
                    warn!("Failed to persist profile: {err}");
                }
                info!("Signed in as {}", user.id);
                Ok(user)
            }
            Err(err) => {
                self.client.clear_credential();
                Err(err)
            }
        }
    }

    pub fn sign_out(&self) {
        self.client.clear_credential();
        for key in [AUTH_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!("Failed to clear {key}: {err}");
            }
        }
        info!("Signed out");
    }
}

#[component]
pub fn App() -> Element {
    let services = use_context::<AppServices>();
    let session = use_signal(|| services.restore_session());
    use_context_provider(|| session);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Owned here so an in-flight submission survives leaving the sell page.
    let wizard = use_signal(SellWizard::new);
    use_context_provider(|| wizard);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Sell() -> Element {
    rsx! { Shell { SellPage {} } }
}

#[component]
pub fn SignIn() -> Element {
    rsx! { Shell { SignInPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(dir: &std::path::Path, api: &str) -> AppServices {
        AppServices::init(AppConfig {
            api_base_url: api.to_string(),
            data_dir: Some(dir.to_path_buf()),
        })
        .expect("services")
    }

    #[tokio::test]
    async fn sign_in_persists_and_restores_session() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/auth/me")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "data": {"id": "u1", "name": "Meera"}}"#)
            .create_async()
            .await;
        let dir = tempfile::tempdir().expect("tempdir");
        let api = format!("{}/api/", server.url());

        let first = services(dir.path(), &api);
        let user = first.sign_in(" abc ").await.expect("signed in");
        assert_eq!(user.name, "Meera");

        let second = services(dir.path(), &api);
        let session = second.restore_session();
        assert_eq!(session.current_user().map(|u| u.id.as_str()), Some("u1"));
        assert!(second.client.has_credential());

        second.sign_out();
        assert!(!second.client.has_credential());
        assert!(!services(dir.path(), &api).restore_session().is_signed_in());
    }

    #[tokio::test]
    async fn rejected_token_is_not_kept() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/auth/me")
            .with_status(401)
            .with_body(r#"{"success": false, "message": "invalid token"}"#)
            .create_async()
            .await;
        let dir = tempfile::tempdir().expect("tempdir");
        let services = services(dir.path(), &format!("{}/api/", server.url()));

        let result = services.sign_in("bad").await;
        assert!(matches!(result, Err(ApiError::Api(ref message)) if message == "invalid token"));
        assert!(!services.client.has_credential());
        assert!(!services.store.contains(AUTH_TOKEN_KEY));
    }
}
