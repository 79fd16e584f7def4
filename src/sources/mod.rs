use crate::error::StoreResult;
use crate::model::{NewRecipe, Recipe, RecipeUpdate};
use std::path::Path;

pub mod directory;
pub mod file;

pub use directory::DirectoryStore;
pub use file::FileStore;

/// Where the recipe catalog lives. Implementations own a session cache: the
/// catalog is read once, and every mutation updates the cache and persists.
pub trait RecipeStore {
    /// The whole catalog. A failed load yields an empty catalog and is
    /// retried on the next call; a successful one is kept for the session.
    fn get_all_recipes(&mut self) -> &[Recipe];

    fn get_recipe_by_id(&mut self, id: &str) -> Option<&Recipe> {
        self.get_all_recipes().iter().find(|r| r.id == id)
    }

    fn add_recipe(&mut self, data: NewRecipe) -> StoreResult<Recipe>;

    /// Returns `false` when no recipe has this id.
    fn update_recipe(&mut self, id: &str, changes: RecipeUpdate) -> StoreResult<bool>;

    /// Returns `false` when no recipe has this id.
    fn delete_recipe(&mut self, id: &str) -> StoreResult<bool>;
}

/// Session cache shared by the store implementations.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    recipes: Vec<Recipe>,
    loaded: bool,
}

impl Catalog {
    pub(crate) fn get_or_load<F>(&mut self, source: &str, load: F) -> &[Recipe]
    where
        F: FnOnce() -> StoreResult<Vec<Recipe>>,
    {
        if !self.loaded {
            match load() {
                Ok(recipes) => {
                    log::info!("{source}: loaded {} recipes", recipes.len());
                    self.recipes = recipes;
                    self.loaded = true;
                }
                Err(e) => {
                    log::warn!("{source}: could not load recipes, using an empty catalog: {e}");
                    self.recipes = Vec::new();
                }
            }
        }
        &self.recipes
    }

    /// Like `get_or_load`, but a failed load is an error: writing over a
    /// catalog that could not be read would lose it.
    pub(crate) fn load_for_write<F>(&mut self, load: F) -> StoreResult<&mut Vec<Recipe>>
    where
        F: FnOnce() -> StoreResult<Vec<Recipe>>,
    {
        if !self.loaded {
            self.recipes = load()?;
            self.loaded = true;
        }
        Ok(&mut self.recipes)
    }
}

pub(crate) fn new_recipe_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A directory path gets a `DirectoryStore`, anything else a `FileStore`.
pub fn open_store(path: &Path) -> Box<dyn RecipeStore> {
    if path.is_dir() {
        Box::new(DirectoryStore::new(path))
    } else {
        Box::new(FileStore::new(path))
    }
}
