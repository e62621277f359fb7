//! UniFFI bindings for recipe-finder
//!
//! FFI-compatible types and functions for the iOS and Android apps.
//! Each call wraps the async Rust API with a synchronous function that owns
//! its own tokio runtime.

use std::fmt;

use crate::{markup, ClientConfig, ProviderError, Recipe, RecipeClient};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe, with markup already rendered to plain text
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub servings: Option<u32>,
    pub ready_in_minutes: Option<u32>,
    pub health_score: Option<f64>,
    pub price_per_serving: Option<f64>,
    pub source_url: Option<String>,
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub gluten_free: Option<bool>,
    pub dairy_free: Option<bool>,
    pub ketogenic: Option<bool>,
    pub whole30: Option<bool>,
    /// Summary as plain text
    pub summary: Option<String>,
    /// Instructions as plain text
    pub instructions: Option<String>,
    pub steps: Vec<String>,
    /// Ingredient lines as written in the source recipe
    pub ingredients: Vec<String>,
    pub used_ingredient_count: Option<u32>,
    pub missed_ingredient_count: Option<u32>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        let summary = recipe.summary_text();
        let instructions = recipe.instructions_text();
        let ingredients = recipe
            .extended_ingredients
            .unwrap_or_default()
            .into_iter()
            .map(|ingredient| ingredient.original.unwrap_or(ingredient.name))
            .collect();

        FfiRecipe {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            servings: recipe.servings,
            ready_in_minutes: recipe.ready_in_minutes,
            health_score: recipe.health_score,
            price_per_serving: recipe.price_per_serving,
            source_url: recipe.source_url,
            vegetarian: recipe.vegetarian,
            vegan: recipe.vegan,
            gluten_free: recipe.gluten_free,
            dairy_free: recipe.dairy_free,
            ketogenic: recipe.ketogenic,
            whole30: recipe.whole30,
            summary,
            instructions,
            steps: recipe.steps,
            ingredients,
            used_ingredient_count: recipe.used_ingredient_count,
            missed_ingredient_count: recipe.missed_ingredient_count,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// Network or payload failure
    Transport { message: String },
    /// Provider returned a non-success status
    Http { code: u16, message: String },
    /// Provider returned nothing usable
    EmptyResult { message: String },
    /// Client could not be configured
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::Transport { message } => write!(f, "Transport error: {}", message),
            FfiRecipeError::Http { code, message } => write!(f, "HTTP {}: {}", code, message),
            FfiRecipeError::EmptyResult { message } => write!(f, "Empty result: {}", message),
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<ProviderError> for FfiRecipeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(message) => FfiRecipeError::Transport { message },
            ProviderError::Http { code, message } => FfiRecipeError::Http { code, message },
            ProviderError::EmptyResult => FfiRecipeError::EmptyResult {
                message: "Provider returned an empty result".to_string(),
            },
        }
    }
}

impl From<config::ConfigError> for FfiRecipeError {
    fn from(err: config::ConfigError) -> Self {
        FfiRecipeError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Client settings passed from the app
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiClientConfig {
    /// API key (uses configuration or SPOONACULAR_API_KEY if not specified)
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn create_client(config: Option<FfiClientConfig>) -> Result<RecipeClient, FfiRecipeError> {
    let overrides = config.unwrap_or_default();
    let mut config = ClientConfig::load().unwrap_or_default();

    if let Some(api_key) = overrides.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(base_url) = overrides.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = overrides.timeout_seconds {
        config.timeout = timeout;
    }

    Ok(RecipeClient::new(&config)?)
}

/// Fetch one random recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn fetch_random_recipe(config: Option<FfiClientConfig>) -> Result<FfiRecipe, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async { Ok(client.fetch_random_recipe().await?.into()) })
}

/// Find recipes that use the given ingredients
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn find_recipes_by_ingredients(
    ingredients: Vec<String>,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipes = client.find_by_ingredients(&ingredients).await?;
        Ok(recipes.into_iter().map(FfiRecipe::from).collect())
    })
}

/// Fetch a recipe by provider id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn fetch_recipe_by_id(
    id: i64,
    config: Option<FfiClientConfig>,
) -> Result<FfiRecipe, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async { Ok(client.fetch_by_id(id).await?.into()) })
}

/// Autocomplete a query into full recipes
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn autocomplete_recipes(
    query: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipes = client.autocomplete(&query).await?;
        Ok(recipes.into_iter().map(FfiRecipe::from).collect())
    })
}

/// Render provider markup as plain text
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_markup(html: String) -> String {
    markup::normalize(&html)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check whether an API key is available without passing one explicitly
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn is_api_key_available() -> bool {
    ClientConfig::load()
        .unwrap_or_default()
        .resolve_api_key()
        .is_some()
}
