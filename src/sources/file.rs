use crate::error::{StoreError, StoreResult};
use crate::model::{NewRecipe, Recipe, RecipeUpdate};
use crate::sources::{Catalog, RecipeStore, new_recipe_id, now_rfc3339};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// The whole catalog as one JSON array, as served by the web app.
pub struct FileStore {
    path: PathBuf,
    catalog: Catalog,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: Catalog::default(),
        }
    }
}

fn load_recipes(path: &Path) -> StoreResult<Vec<Recipe>> {
    if !path.exists() {
        debug!("Catalog {path:?} does not exist, starting empty");
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))
}

fn save_recipes(path: &Path, recipes: &[Recipe]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(recipes).map_err(|e| StoreError::json(path, e))?;
    fs::write(path, content).map_err(|e| StoreError::io(path, e))?;
    info!("FileStore: saved {} recipes to {:?}", recipes.len(), path);
    Ok(())
}

impl RecipeStore for FileStore {
    fn get_all_recipes(&mut self) -> &[Recipe] {
        let path = &self.path;
        self.catalog.get_or_load("FileStore", || load_recipes(path))
    }

    fn add_recipe(&mut self, data: NewRecipe) -> StoreResult<Recipe> {
        let path = &self.path;
        let recipes = self.catalog.load_for_write(|| load_recipes(path))?;

        let recipe = data.into_recipe(new_recipe_id(), now_rfc3339());
        recipes.push(recipe.clone());
        save_recipes(path, recipes)?;
        Ok(recipe)
    }

    fn update_recipe(&mut self, id: &str, changes: RecipeUpdate) -> StoreResult<bool> {
        let path = &self.path;
        let recipes = self.catalog.load_for_write(|| load_recipes(path))?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        changes.apply(recipe);
        save_recipes(path, recipes)?;
        Ok(true)
    }

    fn delete_recipe(&mut self, id: &str) -> StoreResult<bool> {
        let path = &self.path;
        let recipes = self.catalog.load_for_write(|| load_recipes(path))?;

        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Ok(false);
        }
        save_recipes(path, recipes)?;
        Ok(true)
    }
}
