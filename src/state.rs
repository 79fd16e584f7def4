use crate::config::Config;
use crate::lists::Kitchen;
use crate::sources::{RecipeStore, open_store};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub struct AppState {
    pub config: Config,

    pub store: Box<dyn RecipeStore>,

    pub kitchen: Kitchen,

    kitchen_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = open_store(&config.catalog_path());
        let kitchen_path = config.data_dir().map(|dir| dir.join("kitchen.json"));
        let kitchen = kitchen_path.as_deref().map(load_kitchen).unwrap_or_default();

        Self {
            config,
            store,
            kitchen,
            kitchen_path,
        }
    }

    pub fn with_parts(config: Config, store: Box<dyn RecipeStore>, kitchen: Kitchen) -> Self {
        Self {
            config,
            store,
            kitchen,
            kitchen_path: None,
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.kitchen_path {
            save_kitchen(path, &self.kitchen)?;
        }
        Ok(())
    }
}

pub fn load_kitchen(path: &Path) -> Kitchen {
    if let Ok(content) = fs::read_to_string(path) {
        match serde_json::from_str(&content) {
            Ok(kitchen) => return kitchen,
            Err(e) => log::warn!("Ignoring unreadable kitchen state {path:?}: {e}"),
        }
    }
    Kitchen::default()
}

pub fn save_kitchen(path: &Path, kitchen: &Kitchen) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(kitchen)?;
    fs::write(path, content)?;
    log::debug!(
        "Saved kitchen: {} pantry, {} shopping",
        kitchen.pantry.len(),
        kitchen.shopping_list.len()
    );
    Ok(())
}
