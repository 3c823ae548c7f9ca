//! Authentication headers for the HTTP ranker backend.

use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

/// Trait for managing authentication headers
pub trait AuthManager: Send + Sync {
    /// Get the authentication headers for a request
    fn get_headers(&self) -> HeaderMap;

    /// Add authentication headers to an existing header map
    fn add_auth_headers(&self, headers: &mut HeaderMap);

    /// Validate the API key format (basic format validation only)
    fn validate_api_key(&self) -> Result<(), String>;
}

/// Bearer token authentication manager for remote rerank APIs
pub struct BearerAuthManager {
    api_key: SecretString,
    client_name: Option<String>,
}

impl BearerAuthManager {
    /// Create a new bearer authentication manager
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            client_name: None,
        }
    }

    /// Create a new bearer authentication manager with client name
    pub fn with_client_name(api_key: SecretString, client_name: Option<String>) -> Self {
        Self {
            api_key,
            client_name,
        }
    }

    /// Build the User-Agent header value
    fn build_user_agent(&self) -> String {
        let base = format!("rerank-compressor/{}", env!("CARGO_PKG_VERSION"));
        match &self.client_name {
            Some(name) => format!("{} {}", base, name),
            None => base,
        }
    }
}

impl AuthManager for BearerAuthManager {
    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.add_auth_headers(&mut headers);
        headers
    }

    fn add_auth_headers(&self, headers: &mut HeaderMap) {
        let auth_value = format!("Bearer {}", self.api_key.expose_secret());
        if let Ok(value) = auth_value.parse() {
            headers.insert("authorization", value);
        }

        if let Ok(value) = "application/json".parse() {
            headers.insert("content-type", value);
        }

        if let Ok(value) = "application/json".parse() {
            headers.insert("accept", value);
        }

        if let Ok(value) = self.build_user_agent().parse() {
            headers.insert("user-agent", value);
        }

        if let Some(ref name) = self.client_name {
            if let Ok(value) = name.parse() {
                headers.insert("x-client-name", value);
            }
        }
    }

    fn validate_api_key(&self) -> Result<(), String> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        if key.len() < 10 {
            return Err("API key appears to be too short".to_string());
        }

        Ok(())
    }
}
