use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::markup;

/// A recipe as shown to the user.
///
/// Only `title` is guaranteed. Every other field may be missing from a
/// provider payload or a stored document, and `None` means "unknown", not
/// false or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Provider id, absent for recipes authored in the app
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub preparation_minutes: Option<i32>,
    #[serde(default)]
    pub cooking_minutes: Option<i32>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub price_per_serving: Option<f64>,
    #[serde(default)]
    pub spoonacular_score: Option<f64>,
    #[serde(default)]
    pub aggregate_likes: Option<i64>,

    #[serde(default)]
    pub vegetarian: Option<bool>,
    #[serde(default)]
    pub vegan: Option<bool>,
    #[serde(default)]
    pub gluten_free: Option<bool>,
    #[serde(default)]
    pub dairy_free: Option<bool>,
    #[serde(default)]
    pub very_healthy: Option<bool>,
    #[serde(default)]
    pub cheap: Option<bool>,
    #[serde(default)]
    pub very_popular: Option<bool>,
    #[serde(default)]
    pub sustainable: Option<bool>,
    #[serde(default)]
    pub low_fodmap: Option<bool>,
    #[serde(default)]
    pub ketogenic: Option<bool>,
    #[serde(default)]
    pub whole30: Option<bool>,

    #[serde(default)]
    pub cuisines: Option<Vec<String>>,
    #[serde(default)]
    pub dish_types: Option<Vec<String>>,
    #[serde(default)]
    pub diets: Option<Vec<String>>,

    /// Provider markup, see [`Recipe::summary_text`]
    #[serde(default)]
    pub summary: Option<String>,
    /// Provider markup, see [`Recipe::instructions_text`]
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<Instruction>,
    /// Text of every step across every instruction group, in order
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<Ingredient>>,

    // Only present on search-by-ingredient results
    #[serde(default)]
    pub used_ingredient_count: Option<u32>,
    #[serde(default)]
    pub missed_ingredient_count: Option<u32>,

    #[serde(default)]
    pub wine_pairing: Option<WinePairing>,

    // Bookkeeping for recipes authored in the app
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// A locally authored recipe with nothing but a title
    pub fn authored(title: impl Into<String>) -> Self {
        Recipe {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Summary rendered as plain text
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_deref().map(markup::normalize)
    }

    /// Instructions rendered as plain text
    pub fn instructions_text(&self) -> Option<String> {
        self.instructions.as_deref().map(markup::normalize)
    }

    /// Copy of this recipe with a different title
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Recipe {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Copy of this recipe with different instructions
    pub fn with_instructions(&self, instructions: impl Into<String>) -> Self {
        Recipe {
            instructions: Some(instructions.into()),
            ..self.clone()
        }
    }

    pub fn is_authored(&self) -> bool {
        self.user_id.is_some()
    }
}

/// A named group of ordered steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub ingredients: Vec<StepItem>,
    #[serde(default)]
    pub equipment: Vec<StepItem>,
    #[serde(default)]
    pub length: Option<StepLength>,
}

/// An ingredient or a piece of equipment referenced by a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepLength {
    pub number: u32,
    pub unit: String,
}

/// A provider ingredient record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub consistency: Option<String>,
    pub name: String,
    #[serde(default)]
    pub name_clean: Option<String>,
    /// The line as written in the source recipe
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub meta: Vec<String>,
    #[serde(default)]
    pub measures: Option<Measures>,
    #[serde(default)]
    pub nutrition: Option<IngredientNutrition>,
    #[serde(default)]
    pub estimated_cost: Option<Cost>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    #[serde(default)]
    pub us: Option<Measure>,
    #[serde(default)]
    pub metric: Option<Measure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub amount: f64,
    #[serde(default)]
    pub unit_short: String,
    #[serde(default)]
    pub unit_long: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientNutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    #[serde(default)]
    pub properties: Vec<Nutrient>,
    #[serde(default)]
    pub caloric_breakdown: Option<CaloricBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub percent_of_daily_needs: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloricBreakdown {
    pub percent_protein: f64,
    pub percent_fat: f64,
    pub percent_carbs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub value: f64,
    pub unit: String,
}

/// Wine suggestions for a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinePairing {
    #[serde(default)]
    pub paired_wines: Vec<String>,
    #[serde(default)]
    pub pairing_text: String,
    #[serde(default)]
    pub product_matches: Vec<WineProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineProduct {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A title suggestion from the autocomplete endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteSuggestion {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image_type: Option<String>,
}

/// A comment left on an authored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub recipe_key: String,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Profile document for a signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}
