use crate::matcher::matches;
use crate::model::{Ingredient, NewRecipe, RecipeUpdate};
use crate::scoring::{matched_ingredient_details, missing_ingredient_details, score_recipes};
use crate::search::{
    RecipeFilter, all_categories, all_ingredient_names, all_tags, filter_recipes,
    suggest_ingredients,
};
use crate::state::AppState;
use anyhow::{Result, bail};
use clap::Subcommand;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse the recipe catalog
    Recipes {
        /// Text to look for in titles, descriptions, ingredients and steps
        #[arg(short, long)]
        query: Option<String>,
        /// Only recipes carrying every given tag
        #[arg(short, long)]
        tag: Vec<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List every tag in the catalog
    Tags,
    /// List every category in the catalog
    Categories,
    /// Show one recipe, marking what the pantry already covers
    Show {
        id: String,
        /// Toggle ingredient N (1-based) in the pantry before showing
        #[arg(long, value_name = "N")]
        pantry: Vec<usize>,
        /// Toggle ingredient N (1-based) on the shopping list before showing
        #[arg(long, value_name = "N")]
        shop: Vec<usize>,
    },
    /// Recipes you can (almost) make with the pantry
    Cook,
    /// Ingredients a recipe needs that the pantry lacks
    Missing {
        id: String,
        /// Put every missing ingredient on the shopping list
        #[arg(long, conflicts_with = "stock")]
        shop: bool,
        /// Mark every missing ingredient as owned
        #[arg(long)]
        stock: bool,
    },
    /// Manage the pantry
    #[command(subcommand)]
    Pantry(PantryCommand),
    /// Manage the shopping list
    #[command(subcommand)]
    Shop(ShopCommand),
    /// Edit the recipe catalog
    #[command(subcommand)]
    Recipe(RecipeCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum PantryCommand {
    List,
    Add { name: String },
    Remove { name: String },
    Toggle { name: String },
    /// Ingredient names from the catalog containing QUERY
    Suggest { query: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShopCommand {
    List,
    Add { name: String },
    Remove { name: String },
    /// Move an item into the pantry
    Bought { name: String },
    /// Move everything into the pantry
    BoughtAll,
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecipeCommand {
    /// Add a recipe from a JSON file
    Add { file: PathBuf },
    /// Apply a partial JSON update to a recipe
    Update { id: String, file: PathBuf },
    Delete { id: String },
}

/// Run one command. Returns whether the pantry or shopping list changed.
pub fn execute(state: &mut AppState, command: Command, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Recipes { query, tag, category } => {
            let filter = RecipeFilter { query, tags: tag, category };
            let recipes = state.store.get_all_recipes();
            for recipe in filter_recipes(recipes, &filter) {
                writeln!(out, "{}\t{}", recipe.id, recipe.title)?;
            }
            Ok(false)
        }
        Command::Tags => {
            for tag in all_tags(state.store.get_all_recipes()) {
                writeln!(out, "{tag}")?;
            }
            Ok(false)
        }
        Command::Categories => {
            for category in all_categories(state.store.get_all_recipes()) {
                writeln!(out, "{category}")?;
            }
            Ok(false)
        }
        Command::Show { id, pantry, shop } => {
            let changed = toggle_recipe_ingredients(state, &id, &pantry, &shop, out)?;
            show_recipe(state, &id, out)?;
            Ok(changed)
        }
        Command::Cook => {
            let pantry = state.kitchen.pantry_items();
            let recipes = state.store.get_all_recipes();
            for scored in score_recipes(&pantry, recipes) {
                writeln!(
                    out,
                    "{}\t{}\tmissing {} of {}\thave: {}",
                    scored.recipe.id,
                    scored.recipe.title,
                    scored.missing_ingredients,
                    scored.total_ingredients,
                    scored.matching_ingredients.join(", ")
                )?;
            }
            Ok(false)
        }
        Command::Missing { id, shop, stock } => {
            let action = if stock {
                MissingAction::Stock
            } else if shop {
                MissingAction::Shop
            } else {
                MissingAction::List
            };
            missing(state, &id, action, out)
        }
        Command::Pantry(cmd) => pantry(state, cmd, out),
        Command::Shop(cmd) => shop(state, cmd, out),
        Command::Recipe(cmd) => {
            recipe_admin(state, cmd, out)?;
            Ok(false)
        }
    }
}

/// Apply `show --pantry/--shop` toggles, by 1-based ingredient position.
fn toggle_recipe_ingredients(
    state: &mut AppState,
    id: &str,
    pantry: &[usize],
    shop: &[usize],
    out: &mut impl Write,
) -> Result<bool> {
    if pantry.is_empty() && shop.is_empty() {
        return Ok(false);
    }
    let Some(recipe) = state.store.get_recipe_by_id(id) else {
        bail!("no recipe with id '{id}'");
    };
    let ingredients = recipe.ingredients.clone();

    for &n in pantry {
        let ingredient = nth_ingredient(&ingredients, id, n)?;
        let owned = state.kitchen.toggle_pantry_from_recipe(ingredient);
        let verb = if owned { "stocked" } else { "unstocked" };
        writeln!(out, "{verb} {}", ingredient.item)?;
    }
    for &n in shop {
        let ingredient = nth_ingredient(&ingredients, id, n)?;
        let listed = state.kitchen.toggle_shopping_from_recipe(ingredient);
        let verb = if listed { "listed" } else { "unlisted" };
        writeln!(out, "{verb} {}", ingredient.item)?;
    }
    Ok(true)
}

fn nth_ingredient<'a>(ingredients: &'a [Ingredient], id: &str, n: usize) -> Result<&'a Ingredient> {
    match n.checked_sub(1).and_then(|i| ingredients.get(i)) {
        Some(ingredient) => Ok(ingredient),
        None => bail!("recipe '{id}' has no ingredient {n}"),
    }
}

fn show_recipe(state: &mut AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let kitchen = &state.kitchen;
    let pantry = kitchen.pantry_items();
    let Some(recipe) = state.store.get_recipe_by_id(id) else {
        bail!("no recipe with id '{id}'");
    };

    writeln!(out, "{}", recipe.title)?;
    if !recipe.description.is_empty() {
        writeln!(out, "{}", recipe.description)?;
    }
    let have = matched_ingredient_details(recipe, &pantry).len();
    let need = missing_ingredient_details(recipe, &pantry).len();
    writeln!(out, "have {have}, need {need}")?;
    writeln!(out)?;
    for (i, ingredient) in recipe.ingredients.iter().enumerate() {
        let mark = if kitchen.in_pantry(ingredient) {
            "have"
        } else if kitchen.is_on_shopping_list(ingredient) {
            "shop"
        } else {
            "    "
        };
        writeln!(out, "{:>2} [{mark}] {ingredient}", i + 1)?;
    }
    writeln!(out)?;
    for (i, step) in recipe.instructions.iter().enumerate() {
        writeln!(out, "{}. {step}", i + 1)?;
    }
    if let Some(tips) = &recipe.try_this {
        writeln!(out)?;
        for tip in tips {
            writeln!(out, "* {tip}")?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MissingAction {
    List,
    Shop,
    Stock,
}

fn missing(
    state: &mut AppState,
    id: &str,
    action: MissingAction,
    out: &mut impl Write,
) -> Result<bool> {
    let pantry = state.kitchen.pantry_items();
    let Some(recipe) = state.store.get_recipe_by_id(id) else {
        bail!("no recipe with id '{id}'");
    };
    let needed = missing_ingredient_details(recipe, &pantry);

    let mut changed = false;
    for ingredient in &needed {
        match action {
            MissingAction::List => writeln!(out, "{ingredient}")?,
            MissingAction::Shop => {
                let entry = state.kitchen.shop_from_recipe(ingredient);
                writeln!(out, "{ingredient}\t-> {}", entry.item)?;
                changed = true;
            }
            MissingAction::Stock => {
                changed |= state.kitchen.stock_from_recipe(ingredient);
                writeln!(out, "{ingredient}\t-> pantry")?;
            }
        }
    }
    Ok(changed)
}

/// Blank names would match every entry, so they never reach the lists.
fn require_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("ingredient name is empty");
    }
    Ok(name)
}

fn print_list<'a>(
    entries: impl Iterator<Item = &'a Ingredient>,
    out: &mut impl Write,
) -> Result<()> {
    for entry in entries {
        match &entry.notes {
            Some(notes) => writeln!(out, "{entry} ({notes})")?,
            None => writeln!(out, "{entry}")?,
        }
    }
    Ok(())
}

fn pantry(state: &mut AppState, cmd: PantryCommand, out: &mut impl Write) -> Result<bool> {
    let kitchen = &mut state.kitchen;
    match cmd {
        PantryCommand::List => {
            print_list(kitchen.pantry.iter(), out)?;
            Ok(false)
        }
        PantryCommand::Add { name } => {
            let added = kitchen.add_to_pantry(require_name(&name)?);
            if !added {
                writeln!(out, "'{name}' is already in the pantry")?;
            }
            Ok(added)
        }
        PantryCommand::Remove { name } => {
            let removed = kitchen.pantry.remove_matching(require_name(&name)?);
            writeln!(out, "removed {removed}")?;
            Ok(removed > 0)
        }
        PantryCommand::Toggle { name } => {
            let present = kitchen.pantry.toggle(Ingredient::named(require_name(&name)?));
            writeln!(out, "{}", if present { "added" } else { "removed" })?;
            Ok(true)
        }
        PantryCommand::Suggest { query } => {
            let names = all_ingredient_names(state.store.get_all_recipes());
            let limit = state.config.search.suggestion_limit;
            for name in suggest_ingredients(&query, &names, &state.kitchen.pantry, limit) {
                writeln!(out, "{name}")?;
            }
            Ok(false)
        }
    }
}

fn shop(state: &mut AppState, cmd: ShopCommand, out: &mut impl Write) -> Result<bool> {
    let kitchen = &mut state.kitchen;
    match cmd {
        ShopCommand::List => {
            print_list(kitchen.shopping_list.iter(), out)?;
            Ok(false)
        }
        ShopCommand::Add { name } => {
            let before = kitchen.shopping_list.len();
            kitchen.transfer_to_shopping_list(&Ingredient::named(require_name(&name)?));
            Ok(kitchen.shopping_list.len() != before)
        }
        ShopCommand::Remove { name } => {
            let removed = kitchen.shopping_list.remove_matching(require_name(&name)?);
            writeln!(out, "removed {removed}")?;
            Ok(removed > 0)
        }
        ShopCommand::Bought { name } => {
            let name = require_name(&name)?;
            let bought = kitchen
                .shopping_list
                .iter()
                .find(|e| matches(&e.item, name))
                .cloned()
                .unwrap_or_else(|| Ingredient::named(name));
            kitchen.transfer_to_pantry(&bought);
            Ok(true)
        }
        ShopCommand::BoughtAll => {
            let moved = kitchen.move_all_to_pantry();
            writeln!(out, "moved {moved} items to the pantry")?;
            Ok(moved > 0)
        }
        ShopCommand::Clear => {
            let had = !kitchen.shopping_list.is_empty();
            kitchen.shopping_list.clear();
            Ok(had)
        }
    }
}

fn recipe_admin(state: &mut AppState, cmd: RecipeCommand, out: &mut impl Write) -> Result<()> {
    match cmd {
        RecipeCommand::Add { file } => {
            let data: NewRecipe = serde_json::from_str(&fs::read_to_string(&file)?)?;
            let recipe = state.store.add_recipe(data)?;
            writeln!(out, "{}", recipe.id)?;
        }
        RecipeCommand::Update { id, file } => {
            let changes: RecipeUpdate = serde_json::from_str(&fs::read_to_string(&file)?)?;
            if !state.store.update_recipe(&id, changes)? {
                bail!("no recipe with id '{id}'");
            }
        }
        RecipeCommand::Delete { id } => {
            if !state.store.delete_recipe(&id)? {
                bail!("no recipe with id '{id}'");
            }
        }
    }
    Ok(())
}
