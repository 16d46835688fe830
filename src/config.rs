//! Application configuration loaded from environment variables.
//!
//! Provider credentials are read once at startup and held in memory;
//! nothing is re-read per request.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key. Absent means echo mode: prompts are answered
    /// locally without calling the completion provider.
    pub openai_api_key: Option<String>,
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Redirect URI registered with Google for the OAuth callback
    pub google_redirect_uri: String,
    /// Frontend URL for OAuth redirects and CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only. Echo mode (no OpenAI key).
    fn default() -> Self {
        Self {
            openai_api_key: None,
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            google_redirect_uri: "http://localhost:5001/api/google/callback".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 5001,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is optional; without it the AI endpoints run in
    /// echo mode. The Google client credentials are required because every
    /// Google-backed endpoint needs them.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .unwrap_or(5001);

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI").unwrap_or_else(|_| {
                format!("http://localhost:{}/api/google/callback", port)
            }),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("GOOGLE_CLIENT_ID", "test_id");
        env::set_var("GOOGLE_CLIENT_SECRET", "test_secret");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.google_client_id, "test_id");
        assert_eq!(config.google_client_secret, "test_secret");
        assert_eq!(config.port, 5001);
        assert!(config.openai_api_key.is_none());
        assert!(config.google_redirect_uri.ends_with("/api/google/callback"));
    }

    #[test]
    fn test_blank_openai_key_means_echo_mode() {
        env::set_var("GOOGLE_CLIENT_ID", "test_id");
        env::set_var("GOOGLE_CLIENT_SECRET", "test_secret");
        env::set_var("OPENAI_API_KEY", "   ");

        let config = Config::from_env().expect("Config should load");
        assert!(config.openai_api_key.is_none());

        env::remove_var("OPENAI_API_KEY");
    }
}
