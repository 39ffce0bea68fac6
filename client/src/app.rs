//! Application bootstrap and lifecycle
//!
//! The provider stack is built once at startup and torn down explicitly:
//! environment, configuration, logging, session, API client.

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::SessionStore;

/// The assembled application core handed to the shell
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,
}

impl App {
    /// Initialize the provider stack. `persisted_token` is whatever the
    /// shell kept from the last session; expired tokens are discarded here
    /// rather than carried into a half-authenticated state.
    pub fn bootstrap(persisted_token: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Config::load()?;

        init_tracing();
        tracing::info!(environment = %config.environment, "starting Blend Vinos client");

        let session = SessionStore::new();
        session.initialize(persisted_token, Utc::now());

        let api = ApiClient::new(&config, session.clone())?;

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Clear the session on logout
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("session cleared");
    }
}

/// Initialize tracing; repeated calls (tests) are harmless
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blend_vinos_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
