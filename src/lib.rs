pub mod autocomplete;
pub mod builder;
pub mod client;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod markup;
pub mod model;
pub mod recipe_book;
pub mod store;
pub mod uniffi_bindings;

// Re-export commonly used types
pub use autocomplete::{AutocompleteOutcome, RecipeLookup};
pub use builder::RecipeClientBuilder;
pub use client::RecipeClient;
pub use config::ClientConfig;
pub use error::{ProviderError, StoreError};
pub use markup::normalize;
pub use model::{
    AutocompleteSuggestion, Comment, Ingredient, Instruction, Recipe, Step, StepItem, UserProfile,
    WinePairing,
};
pub use recipe_book::RecipeBook;
pub use store::{DocumentStore, InMemoryDocumentStore};

// Re-export UniFFI types when the feature is enabled
#[cfg(feature = "uniffi")]
pub use uniffi_bindings::*;

/// Create a client from `recipe_finder.toml` and `RECIPE_FINDER__*`
/// environment variables
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = recipe_finder::client_from_env()?;
/// let recipe = client.fetch_random_recipe().await?;
/// println!("{}", recipe.title);
/// # Ok(())
/// # }
/// ```
pub fn client_from_env() -> Result<RecipeClient, ::config::ConfigError> {
    let config = ClientConfig::load()?;
    RecipeClient::new(&config)
}
