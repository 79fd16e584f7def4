use crate::error::{StoreError, StoreResult};
use crate::model::{NewRecipe, Recipe, RecipeUpdate};
use crate::sources::{Catalog, RecipeStore, new_recipe_id, now_rfc3339};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One recipe per `*.json` file anywhere under a directory. New recipes are
/// written to `<id>.json` at the top level.
pub struct DirectoryStore {
    dir: PathBuf,
    catalog: Catalog,
    paths: HashMap<String, PathBuf>, // recipe id -> file it was read from
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            catalog: Catalog::default(),
            paths: HashMap::new(),
        }
    }
}

fn scan(dir: &Path, paths: &mut HashMap<String, PathBuf>) -> StoreResult<Vec<Recipe>> {
    let mut recipes = Vec::new();
    paths.clear();

    if !dir.exists() {
        debug!("Recipe directory {dir:?} does not exist, starting empty");
        return Ok(recipes);
    }

    let mut walker: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .collect::<Result<_, _>>()
        .map_err(|e: walkdir::Error| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            StoreError::io(path, e.into())
        })?;
    walker.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in walker {
        let path = entry.path();
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        if !entry.file_type().is_file() || !is_json {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        match serde_json::from_str::<Recipe>(&content) {
            Ok(recipe) => {
                paths.insert(recipe.id.clone(), path.to_path_buf());
                recipes.push(recipe);
            }
            Err(e) => warn!("Skipping {path:?}: {e}"),
        }
    }

    Ok(recipes)
}

fn write_recipe(path: &Path, recipe: &Recipe) -> StoreResult<()> {
    let content = serde_json::to_string_pretty(recipe).map_err(|e| StoreError::json(path, e))?;
    fs::write(path, content).map_err(|e| StoreError::io(path, e))?;
    info!("DirectoryStore: wrote {:?}", path);
    Ok(())
}

impl RecipeStore for DirectoryStore {
    fn get_all_recipes(&mut self) -> &[Recipe] {
        let (dir, paths) = (&self.dir, &mut self.paths);
        self.catalog.get_or_load("DirectoryStore", || scan(dir, paths))
    }

    fn add_recipe(&mut self, data: NewRecipe) -> StoreResult<Recipe> {
        let (dir, paths) = (&self.dir, &mut self.paths);
        let recipes = self.catalog.load_for_write(|| scan(dir, paths))?;

        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        let recipe = data.into_recipe(new_recipe_id(), now_rfc3339());
        let path = dir.join(format!("{}.json", recipe.id));
        write_recipe(&path, &recipe)?;

        self.paths.insert(recipe.id.clone(), path);
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    fn update_recipe(&mut self, id: &str, changes: RecipeUpdate) -> StoreResult<bool> {
        let (dir, paths) = (&self.dir, &mut self.paths);
        let recipes = self.catalog.load_for_write(|| scan(dir, paths))?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        changes.apply(recipe);

        let path = self
            .paths
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{id}.json")));
        write_recipe(&path, recipe)?;
        Ok(true)
    }

    fn delete_recipe(&mut self, id: &str) -> StoreResult<bool> {
        let (dir, paths) = (&self.dir, &mut self.paths);
        let recipes = self.catalog.load_for_write(|| scan(dir, paths))?;

        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Ok(false);
        }

        if let Some(path) = self.paths.remove(id) {
            fs::remove_file(&path).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(true)
    }
}
