/**
 * Client Configuration
 *
 * Holds the server URL and the current session (JWT token + user id).
 */
use uuid::Uuid;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Client configuration and session state
#[derive(Debug, Clone)]
pub struct Config {
    server_url: String,
    token: Option<String>,
    user_id: Option<Uuid>,
}

impl Default for Config {
    fn default() -> Self {
        let server_url =
            std::env::var("WARBLER_API_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self {
            server_url,
            token: None,
            user_id: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at an explicit server URL
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token: None,
            user_id: None,
        }
    }

    /// Install a session (JWT token + user id) after login
    pub fn set_session(&mut self, token: String, user_id: Uuid) {
        self.token = Some(token);
        self.user_id = Some(user_id);
    }

    /// Clear the session (logout)
    pub fn clear_session(&mut self) {
        self.token = None;
        self.user_id = None;
    }

    /// Get the JWT token
    pub fn token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Get the session's user id
    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Whether a session is present
    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let config = Config::with_server_url("http://127.0.0.1:3000");
        assert_eq!(
            config.api_url("/api/tweets"),
            "http://127.0.0.1:3000/api/tweets"
        );
    }

    #[test]
    fn test_session_lifecycle() {
        let mut config = Config::with_server_url("http://localhost:3000");
        assert!(!config.has_session());

        let user_id = Uuid::new_v4();
        config.set_session("token".to_string(), user_id);
        assert!(config.has_session());
        assert_eq!(config.user_id(), Some(user_id));

        config.clear_session();
        assert!(!config.has_session());
        assert_eq!(config.user_id(), None);
    }
}
