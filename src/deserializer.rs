//! Mapping of provider JSON payloads into [`Recipe`] values.
//!
//! Detailed recipe payloads (random, by id, autocomplete details) are strict:
//! any declared field that is missing or null fails the whole object, so a
//! provider response with an unexpected shape never turns into a half-filled
//! recipe. Only `ketogenic`, `whole30` and `analyzedInstructions` fall back to
//! defaults, and a handful of descriptive fields are optional outright.

use crate::model::{Ingredient, Instruction, Recipe, WinePairing};
use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipePayload {
    id: i64,
    title: String,
    servings: u32,
    ready_in_minutes: u32,
    source_url: String,
    health_score: f64,
    price_per_serving: f64,
    vegetarian: bool,
    vegan: bool,
    gluten_free: bool,
    dairy_free: bool,
    very_healthy: bool,
    cheap: bool,
    very_popular: bool,
    sustainable: bool,
    summary: String,
    instructions: String,
    extended_ingredients: Vec<Ingredient>,

    #[serde(default, deserialize_with = "null_as_false")]
    ketogenic: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    whole30: bool,
    #[serde(default, deserialize_with = "lenient_instructions")]
    analyzed_instructions: Vec<Instruction>,

    // Descriptive extras, absent on older payloads
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_type: Option<String>,
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    preparation_minutes: Option<i32>,
    #[serde(default)]
    cooking_minutes: Option<i32>,
    #[serde(default)]
    aggregate_likes: Option<i64>,
    #[serde(default)]
    spoonacular_score: Option<f64>,
    #[serde(default)]
    low_fodmap: Option<bool>,
    #[serde(default)]
    cuisines: Option<Vec<String>>,
    #[serde(default)]
    dish_types: Option<Vec<String>>,
    #[serde(default)]
    diets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RandomRecipes {
    recipes: Vec<RecipePayload>,
}

/// Shape returned by `recipes/findByIngredients`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientMatch {
    id: i64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_type: Option<String>,
    #[serde(default)]
    likes: Option<i64>,
    #[serde(default)]
    used_ingredient_count: Option<u32>,
    #[serde(default)]
    missed_ingredient_count: Option<u32>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn lenient_instructions<'de, D>(deserializer: D) -> Result<Vec<Instruction>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(instructions) => Ok(instructions),
        Err(e) => {
            debug!("Ignoring malformed analyzedInstructions: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Every step's text across every instruction group, in order
pub fn flatten_steps(instructions: &[Instruction]) -> Vec<String> {
    instructions
        .iter()
        .flat_map(|group| group.steps.iter().map(|step| step.step.clone()))
        .collect()
}

impl From<RecipePayload> for Recipe {
    fn from(payload: RecipePayload) -> Self {
        let steps = flatten_steps(&payload.analyzed_instructions);

        Recipe {
            id: Some(payload.id),
            title: payload.title,
            image: payload.image,
            image_type: payload.image_type,
            servings: Some(payload.servings),
            ready_in_minutes: Some(payload.ready_in_minutes),
            preparation_minutes: payload.preparation_minutes,
            cooking_minutes: payload.cooking_minutes,
            source_name: payload.source_name,
            source_url: Some(payload.source_url),
            health_score: Some(payload.health_score),
            price_per_serving: Some(payload.price_per_serving),
            spoonacular_score: payload.spoonacular_score,
            aggregate_likes: payload.aggregate_likes,
            vegetarian: Some(payload.vegetarian),
            vegan: Some(payload.vegan),
            gluten_free: Some(payload.gluten_free),
            dairy_free: Some(payload.dairy_free),
            very_healthy: Some(payload.very_healthy),
            cheap: Some(payload.cheap),
            very_popular: Some(payload.very_popular),
            sustainable: Some(payload.sustainable),
            low_fodmap: payload.low_fodmap,
            ketogenic: Some(payload.ketogenic),
            whole30: Some(payload.whole30),
            cuisines: payload.cuisines,
            dish_types: payload.dish_types,
            diets: payload.diets,
            summary: Some(payload.summary),
            instructions: Some(payload.instructions),
            analyzed_instructions: payload.analyzed_instructions,
            steps,
            extended_ingredients: Some(payload.extended_ingredients),
            used_ingredient_count: None,
            missed_ingredient_count: None,
            // Never read from the payload
            wine_pairing: Some(WinePairing::default()),
            user_id: None,
            created_at: None,
        }
    }
}

impl From<IngredientMatch> for Recipe {
    fn from(found: IngredientMatch) -> Self {
        Recipe {
            id: Some(found.id),
            title: found.title,
            image: found.image,
            image_type: found.image_type,
            aggregate_likes: found.likes,
            used_ingredient_count: found.used_ingredient_count,
            missed_ingredient_count: found.missed_ingredient_count,
            ..Default::default()
        }
    }
}

impl TryFrom<&Value> for Recipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        RecipePayload::deserialize(value).map(Recipe::from)
    }
}

/// Parse a single detailed recipe object
pub fn parse_recipe(json: &str) -> Result<Recipe, serde_json::Error> {
    serde_json::from_str::<RecipePayload>(json).map(Recipe::from)
}

/// Parse the `{"recipes": [...]}` envelope of `recipes/random`
pub fn parse_random_recipes(json: &str) -> Result<Vec<Recipe>, serde_json::Error> {
    let envelope: RandomRecipes = serde_json::from_str(json)?;
    Ok(envelope.recipes.into_iter().map(Recipe::from).collect())
}

/// Parse the array returned by `recipes/findByIngredients`
pub fn parse_ingredient_matches(json: &str) -> Result<Vec<Recipe>, serde_json::Error> {
    let matches: Vec<IngredientMatch> = serde_json::from_str(json)?;
    Ok(matches.into_iter().map(Recipe::from).collect())
}
