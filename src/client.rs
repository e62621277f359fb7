use crate::autocomplete::{self, AutocompleteOutcome, RecipeLookup};
use crate::builder::RecipeClientBuilder;
use crate::config::ClientConfig;
use crate::deserializer::{parse_ingredient_matches, parse_random_recipes, parse_recipe};
use crate::error::ProviderError;
use crate::model::{AutocompleteSuggestion, Recipe};
use async_trait::async_trait;
use config::ConfigError;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Client for the recipe provider API.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) search_count: u32,
    pub(crate) autocomplete_count: u32,
}

impl RecipeClient {
    /// Create a client from loaded configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = RecipeClientBuilder::default()
            .base_url(config.base_url.clone())
            .timeout(std::time::Duration::from_secs(config.timeout))
            .search_count(config.search_count)
            .autocomplete_count(config.autocomplete_count);

        if let Some(api_key) = config.resolve_api_key() {
            builder = builder.api_key(api_key);
        }

        builder.build()
    }

    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the api key and `params`, returning the body of a
    /// successful response
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                code: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body = response.text().await?;
        debug!("{} returned {} bytes", path, body.len());
        Ok(body)
    }

    /// Fetch one random recipe
    pub async fn fetch_random_recipe(&self) -> Result<Recipe, ProviderError> {
        let body = self
            .get("recipes/random", &[("number", "1".to_string())])
            .await?;

        parse_random_recipes(&body)?
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResult)
    }

    /// Find recipes using the given ingredients.
    ///
    /// Pantry staples are not ignored. No matches is an empty list, not an
    /// error.
    pub async fn find_by_ingredients<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<Recipe>, ProviderError> {
        let joined = ingredients
            .iter()
            .map(|i| i.as_ref())
            .collect::<Vec<&str>>()
            .join(",");

        let body = self
            .get(
                "recipes/findByIngredients",
                &[
                    ("ingredients", joined),
                    ("number", self.search_count.to_string()),
                    ("ignorePantry", "false".to_string()),
                ],
            )
            .await?;

        let recipes = parse_ingredient_matches(&body)?;
        info!("findByIngredients matched {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Fetch full recipe information by provider id
    pub async fn fetch_by_id(&self, id: i64) -> Result<Recipe, ProviderError> {
        let body = self
            .get(
                &format!("recipes/{}/information", id),
                &[("includeNutrition", "false".to_string())],
            )
            .await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(ProviderError::EmptyResult);
        }

        Ok(parse_recipe(trimmed)?)
    }

    /// Title suggestions for a query prefix
    pub async fn suggestions(&self, query: &str) -> Result<Vec<AutocompleteSuggestion>, ProviderError> {
        let body = self
            .get(
                "recipes/autocomplete",
                &[
                    ("query", query.to_string()),
                    ("number", self.autocomplete_count.to_string()),
                ],
            )
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Suggestions for `query` resolved to full recipes.
    ///
    /// Fails only when the suggestion request fails. Detail lookups that fail
    /// are dropped, and the order of the result is not the suggestion order.
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Recipe>, ProviderError> {
        self.autocomplete_detailed(query)
            .await
            .map(|outcome| outcome.recipes)
    }

    /// Like [`RecipeClient::autocomplete`], also reporting how many detail
    /// lookups were dropped
    pub async fn autocomplete_detailed(
        &self,
        query: &str,
    ) -> Result<AutocompleteOutcome, ProviderError> {
        let suggestions = self.suggestions(query).await?;
        let outcome = autocomplete::fetch_details(self, suggestions).await;
        info!(
            "autocomplete '{}' resolved {} recipes ({} dropped)",
            query,
            outcome.recipes.len(),
            outcome.failed
        );
        Ok(outcome)
    }
}

#[async_trait]
impl RecipeLookup for RecipeClient {
    async fn lookup(&self, id: i64) -> Result<Recipe, ProviderError> {
        self.fetch_by_id(id).await
    }
}

/// Prefer the provider's own error message, fall back to the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["message"].as_str().map(String::from))
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| status.to_string())
}
