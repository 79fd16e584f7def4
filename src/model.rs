use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ingredient {
    #[serde(default)]
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub item: String,            // The only field that takes part in matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    pub fn new(amount: &str, unit: Option<&str>, item: &str) -> Self {
        Self {
            amount: amount.to_string(),
            unit: unit.map(str::to_string),
            item: item.to_string(),
            notes: None,
        }
    }

    /// A bare entry with no quantity, as typed into the pantry search box.
    pub fn named(item: &str) -> Self {
        Self {
            amount: String::new(),
            unit: None,
            item: item.to_string(),
            notes: None,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.amount.is_empty() {
            parts.push(self.amount.as_str());
        }
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            parts.push(unit);
        }
        parts.push(&self.item);
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub date_added: String,      // RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,  // minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,  // minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_this: Option<Vec<String>>,
}

impl Recipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.as_ref().is_some_and(|tags| tags.iter().any(|t| t == tag))
    }
}

/// Recipe data submitted for creation; the store assigns `id` and `dateAdded`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub try_this: Option<Vec<String>>,
}

impl NewRecipe {
    pub fn into_recipe(self, id: String, date_added: String) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            ingredients: self.ingredients,
            instructions: self.instructions,
            date_added,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            category: self.category,
            tags: self.tags,
            try_this: self.try_this,
        }
    }
}

/// Partial update: every `Some` field overwrites, every `None` field is kept.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub date_added: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub try_this: Option<Vec<String>>,
}

impl RecipeUpdate {
    pub fn apply(self, recipe: &mut Recipe) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut recipe.title, self.title);
        set(&mut recipe.description, self.description);
        set(&mut recipe.image, self.image);
        set(&mut recipe.ingredients, self.ingredients);
        set(&mut recipe.instructions, self.instructions);
        set(&mut recipe.date_added, self.date_added);
        set_opt(&mut recipe.prep_time, self.prep_time);
        set_opt(&mut recipe.cook_time, self.cook_time);
        set_opt(&mut recipe.servings, self.servings);
        set_opt(&mut recipe.category, self.category);
        set_opt(&mut recipe.tags, self.tags);
        set_opt(&mut recipe.try_this, self.try_this);
    }
}

/// A recipe ranked against the pantry. Recomputed on every pantry change.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeWithScore<'a> {
    pub recipe: &'a Recipe,
    pub matching_ingredients: Vec<String>,
    // Signed: one recipe ingredient can be claimed by several pantry items.
    pub missing_ingredients: i64,
    pub total_ingredients: usize,
}
