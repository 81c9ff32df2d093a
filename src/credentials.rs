//! Live-mode credentials read from the environment

use eyre::Result;

use crate::config::ApiConfig;

/// API key and user id for the live Storm service
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub user_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env(api: &ApiConfig) -> Result<Self> {
        Self::from_lookup(api, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(api: &ApiConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(&api.api_key_env).filter(|v| !v.trim().is_empty());
        let Some(api_key) = api_key else {
            eyre::bail!(
                "Missing {key}. Put it in a .env file or export it, e.g.:\n  export {key}='...'\nOptionally set {user} as well.",
                key = api.api_key_env,
                user = api.user_id_env,
            );
        };

        let user_id = lookup(&api.user_id_env)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| api.default_user_id.clone());

        log::debug!("Using credentials for user {}", user_id);
        Ok(Self { api_key, user_id })
    }
}
