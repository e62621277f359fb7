//! Second stage of autocomplete: resolve every suggestion to a full recipe.

use crate::error::ProviderError;
use crate::model::{AutocompleteSuggestion, Recipe};
use async_trait::async_trait;
use log::{debug, warn};
use tokio::task::JoinSet;

/// Anything that can resolve a provider id to a full recipe
#[async_trait]
pub trait RecipeLookup: Clone + Send + Sync + 'static {
    async fn lookup(&self, id: i64) -> Result<Recipe, ProviderError>;
}

/// Resolved recipes plus the number of suggestions that could not be resolved
#[derive(Debug, Clone, Default)]
pub struct AutocompleteOutcome {
    pub recipes: Vec<Recipe>,
    pub failed: usize,
}

/// Look up every suggestion concurrently and keep the successes.
///
/// All lookups run to completion; one failing never cancels the others.
/// Recipes come back in completion order.
pub async fn fetch_details<L: RecipeLookup>(
    lookup: &L,
    suggestions: Vec<AutocompleteSuggestion>,
) -> AutocompleteOutcome {
    let mut tasks = JoinSet::new();

    for suggestion in suggestions {
        let lookup = lookup.clone();
        tasks.spawn(async move {
            let result = lookup.lookup(suggestion.id).await;
            (suggestion, result)
        });
    }

    let mut outcome = AutocompleteOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((suggestion, Ok(recipe))) => {
                debug!("Resolved suggestion {} ({})", suggestion.id, suggestion.title);
                outcome.recipes.push(recipe);
            }
            Ok((suggestion, Err(e))) => {
                warn!(
                    "Dropping suggestion {} ({}): {}",
                    suggestion.id, suggestion.title, e
                );
                outcome.failed += 1;
            }
            Err(e) => {
                warn!("Detail lookup task did not complete: {}", e);
                outcome.failed += 1;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone)]
    struct FakeLookup {
        failing: Vec<i64>,
    }

    #[async_trait]
    impl RecipeLookup for FakeLookup {
        async fn lookup(&self, id: i64) -> Result<Recipe, ProviderError> {
            // Later ids finish first
            tokio::time::sleep(Duration::from_millis(50u64.saturating_sub(id as u64 * 10))).await;
            if self.failing.contains(&id) {
                return Err(ProviderError::Http {
                    code: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            Ok(Recipe {
                id: Some(id),
                ..Recipe::authored(format!("Recipe {}", id))
            })
        }
    }

    fn suggestions(ids: &[i64]) -> Vec<AutocompleteSuggestion> {
        ids.iter()
            .map(|&id| AutocompleteSuggestion {
                id,
                title: format!("Recipe {}", id),
                image_type: Some("jpg".to_string()),
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_dropped() {
        let lookup = FakeLookup {
            failing: vec![2, 4],
        };
        let outcome = fetch_details(&lookup, suggestions(&[1, 2, 3, 4, 5])).await;

        assert_eq!(outcome.recipes.len(), 3);
        assert_eq!(outcome.failed, 2);
        let mut ids: Vec<i64> = outcome.recipes.iter().filter_map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failures_is_empty_success() {
        let lookup = FakeLookup {
            failing: vec![1, 2],
        };
        let outcome = fetch_details(&lookup, suggestions(&[1, 2])).await;
        assert!(outcome.recipes.is_empty());
        assert_eq!(outcome.failed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_suggestions() {
        let lookup = FakeLookup { failing: vec![] };
        let outcome = fetch_details(&lookup, Vec::new()).await;
        assert!(outcome.recipes.is_empty());
        assert_eq!(outcome.failed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_in_completion_order() {
        let lookup = FakeLookup { failing: vec![] };
        let outcome = fetch_details(&lookup, suggestions(&[1, 2, 3])).await;
        let ids: Vec<i64> = outcome.recipes.iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
