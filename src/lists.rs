//! Pantry and shopping list, kept as sets keyed by matched identity.
//!
//! Two entries that `matches` each other never coexist in one list. Every
//! mutation rebuilds the list from a filtered or appended copy, so repeating
//! an operation leaves membership unchanged.

use crate::matcher::matches;
use crate::model::Ingredient;
use crate::normalize::core_name;
use log::debug;
use serde::{Deserialize, Serialize};

/// Loading goes through `FromIterator`, so a stored file with blank or
/// duplicate entries comes back deduplicated.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Vec<Ingredient>", into = "Vec<Ingredient>")]
pub struct IngredientList {
    entries: Vec<Ingredient>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Ingredient] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item names of every entry, in list order.
    pub fn items(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    pub fn contains_match(&self, name: &str) -> bool {
        !name.trim().is_empty() && self.entries.iter().any(|e| matches(&e.item, name))
    }

    /// Add the ingredient unless an existing entry already matches it.
    /// Blank items are dropped: an empty name would match every entry.
    pub fn add_if_absent(&mut self, ingredient: Ingredient) -> bool {
        if ingredient.item.trim().is_empty() {
            debug!("Ignoring ingredient with blank item");
            return false;
        }
        let covered = self.entries.iter().find(|e| matches(&e.item, &ingredient.item));
        if let Some(existing) = covered {
            debug!("'{}' already covered by '{}'", ingredient.item, existing.item);
            return false;
        }

        let mut next = self.entries.clone();
        next.push(ingredient);
        self.entries = next;
        true
    }

    /// Remove every entry matching `name`, returning how many went.
    pub fn remove_matching(&mut self, name: &str) -> usize {
        if name.trim().is_empty() {
            return 0;
        }

        let before = self.entries.len();
        self.entries = self
            .entries
            .iter()
            .filter(|e| !matches(&e.item, name))
            .cloned()
            .collect();

        let removed = before - self.entries.len();
        debug!("Removed {removed} entries matching '{name}'");
        removed
    }

    /// Flip presence of the ingredient, checking presence by match rather
    /// than by spelling. Returns whether it is present afterwards.
    pub fn toggle(&mut self, ingredient: Ingredient) -> bool {
        if self.contains_match(&ingredient.item) {
            self.remove_matching(&ingredient.item);
            false
        } else {
            self.add_if_absent(ingredient)
        }
    }

    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }
}

impl FromIterator<Ingredient> for IngredientList {
    /// Collects through `add_if_absent`, so the result is already deduplicated.
    fn from_iter<I: IntoIterator<Item = Ingredient>>(iter: I) -> Self {
        let mut list = Self::new();
        for ingredient in iter {
            list.add_if_absent(ingredient);
        }
        list
    }
}

impl From<Vec<Ingredient>> for IngredientList {
    fn from(entries: Vec<Ingredient>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<IngredientList> for Vec<Ingredient> {
    fn from(list: IngredientList) -> Self {
        list.entries
    }
}

/// The user's pantry and shopping list, moved between as a pair.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Kitchen {
    #[serde(default)]
    pub pantry: IngredientList,
    #[serde(default)]
    pub shopping_list: IngredientList,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pantry_items(&self) -> Vec<String> {
        self.pantry.items()
    }

    /// Search-add: a bare name with no quantity.
    pub fn add_to_pantry(&mut self, name: &str) -> bool {
        self.pantry.add_if_absent(Ingredient::named(name.trim()))
    }

    /// Put an ingredient on the shopping list without its quantity.
    pub fn transfer_to_shopping_list(&mut self, ingredient: &Ingredient) -> Ingredient {
        let entry = Ingredient {
            amount: String::new(),
            unit: Some(String::new()),
            item: ingredient.item.clone(),
            notes: ingredient.notes.clone(),
        };
        self.shopping_list.add_if_absent(entry.clone());
        entry
    }

    /// Owning an ingredient means no longer shopping for it.
    pub fn transfer_to_pantry(&mut self, ingredient: &Ingredient) {
        self.pantry.add_if_absent(ingredient.clone());
        self.shopping_list.remove_matching(&ingredient.item);
    }

    /// Transfer every shopping-list entry into the pantry.
    pub fn move_all_to_pantry(&mut self) -> usize {
        let bought: Vec<Ingredient> = self.shopping_list.entries().to_vec();
        for ingredient in &bought {
            self.transfer_to_pantry(ingredient);
        }
        self.shopping_list.clear();
        bought.len()
    }

    /// Mark a recipe ingredient as owned, under its core name.
    pub fn stock_from_recipe(&mut self, ingredient: &Ingredient) -> bool {
        self.pantry.add_if_absent(Ingredient::named(&core_name(&ingredient.item)))
    }

    /// Put a recipe ingredient on the shopping list, under its core name.
    pub fn shop_from_recipe(&mut self, ingredient: &Ingredient) -> Ingredient {
        let core = Ingredient {
            item: core_name(&ingredient.item),
            ..ingredient.clone()
        };
        self.transfer_to_shopping_list(&core)
    }

    /// Flip a recipe ingredient's pantry mark. Stocking it also takes it off
    /// the shopping list. Returns true when stocking, false when removing.
    pub fn toggle_pantry_from_recipe(&mut self, ingredient: &Ingredient) -> bool {
        if self.in_pantry(ingredient) {
            self.pantry.remove_matching(&ingredient.item);
            return false;
        }
        self.stock_from_recipe(ingredient);
        self.shopping_list.remove_matching(&core_name(&ingredient.item));
        true
    }

    /// Flip a recipe ingredient's shopping mark. Returns whether it is on the
    /// list afterwards.
    pub fn toggle_shopping_from_recipe(&mut self, ingredient: &Ingredient) -> bool {
        if self.is_on_shopping_list(ingredient) {
            self.shopping_list.remove_matching(&core_name(&ingredient.item));
            return false;
        }
        self.shop_from_recipe(ingredient);
        self.is_on_shopping_list(ingredient)
    }

    pub fn is_on_shopping_list(&self, recipe_ingredient: &Ingredient) -> bool {
        self.shopping_list.contains_match(&core_name(&recipe_ingredient.item))
    }

    pub fn in_pantry(&self, recipe_ingredient: &Ingredient) -> bool {
        self.pantry.contains_match(&recipe_ingredient.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> IngredientList {
        items.iter().map(|i| Ingredient::named(i)).collect()
    }

    #[test]
    fn test_add_if_absent_drops_matches() {
        let mut l = list(&["garlic"]);
        assert!(!l.add_if_absent(Ingredient::named("Garlic, minced")));
        assert!(l.add_if_absent(Ingredient::named("onion")));
        assert_eq!(l.items(), vec!["garlic", "onion"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = list(&["rice"]);
        once.add_if_absent(Ingredient::named("beans"));
        let mut twice = once.clone();
        twice.add_if_absent(Ingredient::named("beans"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_items_are_ignored() {
        let mut l = list(&["salt"]);
        assert!(!l.add_if_absent(Ingredient::named("  ")));
        assert_eq!(l.remove_matching(""), 0);
        assert!(!l.contains_match(""));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_from_iter_dedups() {
        let l = list(&["salt", "sea salt", "pepper", "salt"]);
        assert_eq!(l.items(), vec!["salt", "pepper"]);
    }

    #[test]
    fn test_remove_matching_purges_every_match() {
        // Built directly: both salts would not survive add_if_absent together.
        let mut l = IngredientList {
            entries: vec![
                Ingredient::named("sea salt"),
                Ingredient::named("table salt"),
                Ingredient::named("pepper"),
            ],
        };
        assert_eq!(l.remove_matching("salt"), 2);
        assert_eq!(l.items(), vec!["pepper"]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut l = list(&["pepper", "basil"]);
        let original = l.clone();

        assert!(!l.toggle(Ingredient::named("fresh basil")));
        assert_eq!(l.items(), vec!["pepper"]);
        assert!(l.toggle(Ingredient::named("fresh basil")));
        assert_eq!(l.len(), original.len());
        assert!(l.contains_match("basil"));

        assert!(l.toggle(Ingredient::named("onion")));
        assert!(!l.toggle(Ingredient::named("onion")));
        assert!(!l.contains_match("onion"));
    }

    #[test]
    fn test_transfer_to_shopping_list_strips_quantity() {
        let mut k = Kitchen::new();
        let flour = Ingredient::new("1", Some("cup"), "flour");
        let entry = k.transfer_to_shopping_list(&flour);

        assert_eq!(entry, Ingredient {
            amount: String::new(),
            unit: Some(String::new()),
            item: "flour".to_string(),
            notes: None,
        });
        assert_eq!(k.shopping_list.entries(), &[entry]);
    }

    #[test]
    fn test_transfer_to_shopping_list_keeps_notes() {
        let mut k = Kitchen::new();
        let mut ing = Ingredient::new("2", Some("tbsp"), "butter");
        ing.notes = Some("softened".to_string());
        let entry = k.transfer_to_shopping_list(&ing);
        assert_eq!(entry.notes.as_deref(), Some("softened"));
    }

    #[test]
    fn test_transfer_to_pantry_clears_shopping_entry() {
        let mut k = Kitchen::new();
        k.transfer_to_shopping_list(&Ingredient::named("sea salt"));
        k.transfer_to_shopping_list(&Ingredient::named("pepper"));

        k.transfer_to_pantry(&Ingredient::named("salt"));

        assert_eq!(k.pantry_items(), vec!["salt"]);
        assert_eq!(k.shopping_list.items(), vec!["pepper"]);
    }

    #[test]
    fn test_move_all_to_pantry() {
        let mut k = Kitchen::new();
        k.add_to_pantry("rice");
        k.transfer_to_shopping_list(&Ingredient::named("rice"));
        k.transfer_to_shopping_list(&Ingredient::named("beans"));

        assert_eq!(k.move_all_to_pantry(), 2);
        assert!(k.shopping_list.is_empty());
        assert_eq!(k.pantry_items(), vec!["rice", "beans"]);
    }

    #[test]
    fn test_recipe_transfers_use_core_name() {
        let mut k = Kitchen::new();
        let basil = Ingredient::new("2", Some("cups"), "fresh chopped basil");
        let oil = Ingredient::new("1", Some("tbsp"), "extra virgin olive oil");

        assert!(k.stock_from_recipe(&basil));
        assert_eq!(k.pantry_items(), vec!["basil"]);
        assert!(k.in_pantry(&basil));

        let entry = k.shop_from_recipe(&oil);
        assert_eq!(entry.item, "olive oil");
        assert!(k.is_on_shopping_list(&oil));
        assert!(!k.is_on_shopping_list(&basil));
    }

    #[test]
    fn test_pantry_toggle_from_recipe_takes_it_off_the_list() {
        let mut k = Kitchen::new();
        let sugar = Ingredient::new("1", Some("cup"), "granulated sugar");
        k.shop_from_recipe(&sugar);
        assert!(k.is_on_shopping_list(&sugar));

        assert!(k.toggle_pantry_from_recipe(&sugar));
        assert!(k.in_pantry(&sugar));
        assert!(!k.is_on_shopping_list(&sugar));
        assert!(k.shopping_list.is_empty());

        assert!(!k.toggle_pantry_from_recipe(&sugar));
        assert!(!k.in_pantry(&sugar));
        assert!(k.pantry.is_empty());
    }

    #[test]
    fn test_shopping_toggle_from_recipe() {
        let mut k = Kitchen::new();
        k.add_to_pantry("basil");
        let oil = Ingredient::new("2", Some("tbsp"), "extra virgin olive oil");

        assert!(k.toggle_shopping_from_recipe(&oil));
        assert_eq!(k.shopping_list.items(), vec!["olive oil"]);
        assert!(!k.toggle_shopping_from_recipe(&oil));
        assert!(k.shopping_list.is_empty());
        assert_eq!(k.pantry_items(), vec!["basil"]);
    }

    #[test]
    fn test_loading_drops_blank_and_duplicate_entries() {
        let json = r#"[{"item":""},{"item":"sea salt"},{"item":"salt"},{"item":"pepper"}]"#;
        let l: IngredientList = serde_json::from_str(json).unwrap();
        assert_eq!(l.items(), vec!["sea salt", "pepper"]);
    }

    #[test]
    fn test_loaded_kitchen_has_no_blank_entries() {
        let json = r#"{"pantry":[{"item":""},{"item":"garlic"}],"shoppingList":[{"item":"  "}]}"#;
        let mut k: Kitchen = serde_json::from_str(json).unwrap();
        let sugar = Ingredient::new("1", Some("cup"), "sugar");

        assert_eq!(k.pantry_items(), vec!["garlic"]);
        assert!(k.shopping_list.is_empty());
        assert!(!k.in_pantry(&sugar));
        assert!(!k.is_on_shopping_list(&sugar));
        assert!(k.add_to_pantry("sugar"));
    }

    #[test]
    fn test_kitchen_json_shape() {
        let mut k = Kitchen::new();
        k.add_to_pantry("eggs");
        let json = serde_json::to_value(&k).unwrap();
        assert_eq!(json["pantry"][0]["item"], "eggs");
        assert!(json["shoppingList"].as_array().unwrap().is_empty());

        let back: Kitchen = serde_json::from_value(json).unwrap();
        assert_eq!(back, k);
    }
}
