pub mod behavior;
pub mod login;
pub mod logout;
pub mod logs;
pub mod maintenance;
pub mod profile;
pub mod prompts;
pub mod register;
pub mod render;
pub mod whoami;

use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::PredictionClient;
use crate::config::{load_config, VahanConfig};
use crate::dashboard::Dashboard;
use crate::demo::SystemClock;
use crate::session::{Session, SessionStore};

/// Config, session and API location shared by the commands.
pub(crate) struct CommandContext {
    pub config: VahanConfig,
    pub store: SessionStore,
    pub api_url: String,
}

impl CommandContext {
    pub fn load(api_url: Option<&str>) -> Result<Self> {
        let config = load_config().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring unreadable config");
            VahanConfig::default()
        });
        let store = SessionStore::default_location()?;
        let api_url = config.resolve_api_url(api_url);
        Ok(Self {
            config,
            store,
            api_url,
        })
    }

    pub fn client(&self) -> Result<PredictionClient> {
        PredictionClient::new(&self.api_url, self.config.request_timeout())
            .context("failed to create prediction client")
    }

    /// Stored session, treating an unreadable file as logged out.
    pub fn session(&self) -> Option<Session> {
        self.store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring unreadable session");
            None
        })
    }

    /// Dashboard for the session. A bad API URL only matters to
    /// authenticated sessions, which then get fallback reports.
    pub fn dashboard(&self, session: Option<&Session>, no_delay: bool) -> Dashboard<SystemClock> {
        let latency = if no_delay {
            Duration::ZERO
        } else {
            self.config.demo_latency()
        };
        Dashboard::for_session(
            session,
            &self.api_url,
            self.config.request_timeout(),
            SystemClock,
            latency,
        )
    }
}
