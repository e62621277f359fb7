use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings for the recipe provider client
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Provider API key (falls back to SPOONACULAR_API_KEY when unset)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of matches requested from findByIngredients
    #[serde(default = "default_search_count")]
    pub search_count: u32,
    /// Number of suggestions requested from autocomplete
    #[serde(default = "default_autocomplete_count")]
    pub autocomplete_count: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            search_count: default_search_count(),
            autocomplete_count: default_autocomplete_count(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_search_count() -> u32 {
    10
}

fn default_autocomplete_count() -> u32 {
    10
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe_finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// API key from configuration, or from SPOONACULAR_API_KEY
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
    }
}

/// Load configuration from file and environment variables
///
/// See [`ClientConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_finder").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
