//! Catalog browsing and pantry search suggestions.

use crate::lists::IngredientList;
use crate::model::Recipe;
use crate::normalize::{normalize, strip_parentheticals, tokenize};
use std::collections::BTreeSet;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Base ingredients also offered on their own when they appear inside a
/// longer name, so "salt" is searchable even if recipes only say "sea salt".
const BASE_INGREDIENTS: &[&str] = &[
    "flour", "sugar", "salt", "pepper", "oil", "butter", "milk", "cream", "cheese",
    "eggs", "egg", "water", "vinegar", "wine", "beer", "stock", "broth", "honey",
    "garlic", "onion", "onions", "ginger", "lemon", "lime", "tomato", "tomatoes",
    "potato", "potatoes", "carrot", "carrots", "celery", "mushrooms", "mushroom",
    "chicken", "beef", "pork", "fish", "salmon", "shrimp", "pasta", "rice", "bread",
    "basil", "oregano", "thyme", "rosemary", "parsley", "cilantro", "spinach", "lettuce",
];

#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

impl RecipeFilter {
    fn matches_query(recipe: &Recipe, query: &str) -> bool {
        recipe.title.to_lowercase().contains(query)
            || recipe.description.to_lowercase().contains(query)
            || recipe.ingredients.iter().any(|i| i.item.to_lowercase().contains(query))
            || recipe.instructions.iter().any(|s| s.to_lowercase().contains(query))
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        if let Some(query) = self.query.as_deref().map(normalize).filter(|q| !q.is_empty()) {
            if !Self::matches_query(recipe, &query) {
                return false;
            }
        }

        if !self.tags.iter().all(|tag| recipe.has_tag(tag)) {
            return false;
        }

        match self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => recipe
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category)),
            None => true,
        }
    }
}

pub fn filter_recipes<'a>(recipes: &'a [Recipe], filter: &RecipeFilter) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| filter.accepts(r)).collect()
}

pub fn all_tags(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|r| r.tags.iter().flatten())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn all_categories(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .filter_map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every ingredient name in the catalog, cleaned for display in search.
pub fn all_ingredient_names(recipes: &[Recipe]) -> Vec<String> {
    let mut names = BTreeSet::new();

    for ingredient in recipes.iter().flat_map(|r| &r.ingredients) {
        let name = strip_parentheticals(&normalize(&ingredient.item));
        if name.is_empty() {
            continue;
        }
        for word in tokenize(&name) {
            if BASE_INGREDIENTS.contains(&word.as_str()) {
                names.insert(word);
            }
        }
        names.insert(name);
    }

    names.into_iter().collect()
}

/// Names containing `query` that the pantry does not already cover.
pub fn suggest_ingredients(
    query: &str,
    names: &[String],
    pantry: &IngredientList,
    limit: usize,
) -> Vec<String> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    names
        .iter()
        .filter(|name| name.contains(&query) && !pantry.contains_match(name))
        .take(limit)
        .cloned()
        .collect()
}
