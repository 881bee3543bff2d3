use byline_core::config::Config;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
///
/// The config (and with it the admin allowlist) is injected here rather than
/// read from a global, so tests can run routers with different permissions.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self {
            root,
            config: Arc::new(config),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.config.is_admin(email)
    }
}
