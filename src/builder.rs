use std::time::Duration;

use config::ConfigError;
use reqwest::Client;

use crate::client::RecipeClient;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_COUNT: u32 = 10;

/// Builder for configuring a [`RecipeClient`]
#[derive(Debug, Default)]
pub struct RecipeClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    search_count: Option<u32>,
    autocomplete_count: Option<u32>,
}

impl RecipeClientBuilder {
    /// Set the provider API key
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeClient;
    ///
    /// let builder = RecipeClient::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at a different API host (proxies, tests)
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeClient;
    ///
    /// let builder = RecipeClient::builder()
    ///     .api_key("your-api-key")
    ///     .base_url("http://localhost:8080");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeClient;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClient::builder()
    ///     .api_key("your-api-key")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Maximum number of matches requested by `find_by_ingredients`
    pub fn search_count(mut self, count: u32) -> Self {
        self.search_count = Some(count);
        self
    }

    /// Maximum number of suggestions requested by `autocomplete`
    pub fn autocomplete_count(mut self, count: u32) -> Self {
        self.autocomplete_count = Some(count);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `ConfigError` if:
    /// - No API key was specified
    /// - The HTTP client could not be created
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeClient;
    ///
    /// let client = RecipeClient::builder().api_key("your-api-key").build();
    /// assert!(client.is_ok());
    ///
    /// let missing = RecipeClient::builder().build();
    /// assert!(missing.is_err());
    /// ```
    pub fn build(self) -> Result<RecipeClient, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::NotFound("api_key".to_string()))?;

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Message(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(RecipeClient {
            client,
            base_url,
            api_key,
            search_count: self.search_count.unwrap_or(DEFAULT_COUNT),
            autocomplete_count: self.autocomplete_count.unwrap_or(DEFAULT_COUNT),
        })
    }
}
