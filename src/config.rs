/// Bridge configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the environment variable that holds the shared connection
    /// secret, read by `EnvSecretStore` on every lookup.
    pub api_key_var: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `API_KEY_VAR` overrides where the shared secret is looked up;
    /// otherwise `BRIDGE_API_KEY` is assumed.
    pub fn from_env() -> Self {
        Self {
            api_key_var: std::env::var("API_KEY_VAR")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "BRIDGE_API_KEY".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key_var: "BRIDGE_API_KEY".to_string(),
        }
    }
}
