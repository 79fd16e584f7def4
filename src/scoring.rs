//! Ranking recipes by how much of them the pantry already covers.

use crate::matcher::matches;
use crate::model::{Ingredient, Recipe, RecipeWithScore};
use crate::normalize::normalize;

fn covered_by(ingredient: &Ingredient, pantry_items: &[String]) -> bool {
    pantry_items.iter().any(|p| matches(p, &ingredient.item))
}

/// Score every recipe that shares at least one ingredient with the pantry.
///
/// A pantry item counts once if it matches any ingredient of the recipe, so
/// the count is over pantry items, not recipe ingredients, and
/// `missing_ingredients` can go below zero when several pantry items land on
/// the same recipe ingredient. Results are ordered by fewest missing, then
/// fewest total; ties keep catalog order.
pub fn score_recipes<'a>(
    pantry_items: &[String],
    recipes: &'a [Recipe],
) -> Vec<RecipeWithScore<'a>> {
    if pantry_items.is_empty() {
        return Vec::new();
    }

    let pantry: Vec<String> = pantry_items.iter().map(|p| normalize(p)).collect();

    let mut scored: Vec<RecipeWithScore<'a>> = recipes
        .iter()
        .filter_map(|recipe| {
            let matching_ingredients: Vec<String> = pantry
                .iter()
                .filter(|p| recipe.ingredients.iter().any(|ing| matches(p, &ing.item)))
                .cloned()
                .collect();

            if matching_ingredients.is_empty() {
                return None;
            }

            let total = recipe.ingredients.len();
            Some(RecipeWithScore {
                recipe,
                missing_ingredients: total as i64 - matching_ingredients.len() as i64,
                total_ingredients: total,
                matching_ingredients,
            })
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| {
        a.missing_ingredients
            .cmp(&b.missing_ingredients)
            .then_with(|| a.total_ingredients.cmp(&b.total_ingredients))
    });

    log::debug!("score_recipes: {} of {} recipes overlap the pantry", scored.len(), recipes.len());
    scored
}

/// Recipe ingredients that no pantry item matches, in recipe order.
pub fn missing_ingredient_details(recipe: &Recipe, pantry_items: &[String]) -> Vec<Ingredient> {
    recipe
        .ingredients
        .iter()
        .filter(|ing| !covered_by(ing, pantry_items))
        .cloned()
        .collect()
}

/// Recipe ingredients that some pantry item matches, in recipe order.
pub fn matched_ingredient_details(recipe: &Recipe, pantry_items: &[String]) -> Vec<Ingredient> {
    recipe
        .ingredients
        .iter()
        .filter(|ing| covered_by(ing, pantry_items))
        .cloned()
        .collect()
}
