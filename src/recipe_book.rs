use crate::error::StoreError;
use crate::model::{Comment, Recipe, UserProfile};
use crate::store::DocumentStore;
use chrono::Utc;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

const RECIPES: &str = "recipes";
const COMMENTS: &str = "comments";
const USERS: &str = "users";

/// Recipes, comments and profiles authored by users of the app
pub struct RecipeBook<S: DocumentStore> {
    store: S,
}

fn decode<T: DeserializeOwned>(document: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(document)?)
}

fn require(value: &str, what: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{} cannot be empty", what)));
    }
    Ok(())
}

impl<S: DocumentStore> RecipeBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a recipe authored by `user_id` and return its key.
    ///
    /// The stored copy carries the owner and the creation time; the caller's
    /// value is left untouched.
    pub async fn save_recipe(&self, user_id: &str, recipe: &Recipe) -> Result<String, StoreError> {
        require(user_id, "user id")?;
        require(&recipe.title, "recipe title")?;

        let key = Uuid::new_v4().to_string();
        let stamped = Recipe {
            user_id: Some(user_id.to_string()),
            created_at: Some(Utc::now()),
            ..recipe.clone()
        };

        self.store
            .set(RECIPES, &key, serde_json::to_value(&stamped)?)
            .await?;
        info!("Saved recipe '{}' for user {} as {}", stamped.title, user_id, key);
        Ok(key)
    }

    pub async fn get_recipe(&self, key: &str) -> Result<Option<Recipe>, StoreError> {
        self.store
            .get(RECIPES, key)
            .await?
            .map(decode::<Recipe>)
            .transpose()
    }

    /// Recipes owned by `user_id`, newest first
    pub async fn recipes_for_user(&self, user_id: &str) -> Result<Vec<(String, Recipe)>, StoreError> {
        let mut recipes = Vec::new();
        for (key, document) in self.store.list(RECIPES).await? {
            let recipe: Recipe = decode(document)?;
            if recipe.user_id.as_deref() == Some(user_id) {
                recipes.push((key, recipe));
            }
        }
        recipes.sort_by(|(_, a), (_, b)| b.created_at.cmp(&a.created_at));
        debug!("User {} has {} recipes", user_id, recipes.len());
        Ok(recipes)
    }

    /// Replace the recipe at `key` with an edited copy.
    ///
    /// Owner and creation time always come from the stored version.
    pub async fn update_recipe(&self, key: &str, recipe: &Recipe) -> Result<Recipe, StoreError> {
        require(&recipe.title, "recipe title")?;
        let existing = self
            .get_recipe(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", RECIPES, key)))?;

        let updated = Recipe {
            user_id: existing.user_id,
            created_at: existing.created_at,
            ..recipe.clone()
        };
        self.store
            .set(RECIPES, key, serde_json::to_value(&updated)?)
            .await?;
        info!("Updated recipe {}", key);
        Ok(updated)
    }

    /// Delete a recipe together with its comments
    pub async fn delete_recipe(&self, key: &str) -> Result<(), StoreError> {
        for comment in self.comments_for(key).await? {
            self.store.delete(COMMENTS, &comment.id).await?;
        }
        self.store.delete(RECIPES, key).await?;
        info!("Deleted recipe {}", key);
        Ok(())
    }

    pub async fn add_comment(
        &self,
        recipe_key: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Comment, StoreError> {
        require(user_id, "user id")?;
        require(text, "comment")?;
        if self.store.get(RECIPES, recipe_key).await?.is_none() {
            return Err(StoreError::NotFound(format!("{}/{}", RECIPES, recipe_key)));
        }

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            recipe_key: recipe_key.to_string(),
            user_id: user_id.to_string(),
            text: text.trim().to_string(),
            created_at: Utc::now(),
        };
        self.store
            .set(COMMENTS, &comment.id, serde_json::to_value(&comment)?)
            .await?;
        Ok(comment)
    }

    /// Comments on a recipe, oldest first
    pub async fn comments_for(&self, recipe_key: &str) -> Result<Vec<Comment>, StoreError> {
        let mut comments = Vec::new();
        for (_, document) in self.store.list(COMMENTS).await? {
            let comment: Comment = decode(document)?;
            if comment.recipe_key == recipe_key {
                comments.push(comment);
            }
        }
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        require(&profile.user_id, "user id")?;
        require(&profile.display_name, "display name")?;
        self.store
            .set(USERS, &profile.user_id, serde_json::to_value(profile)?)
            .await
    }

    pub async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        self.store
            .get(USERS, user_id)
            .await?
            .map(decode::<UserProfile>)
            .transpose()
    }
}
