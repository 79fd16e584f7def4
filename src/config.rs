use crate::search::DEFAULT_SUGGESTION_LIMIT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    /// Recipe catalog: a JSON file, or a directory of one-recipe JSON files.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Where pantry and shopping list are kept.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_suggestion_limit() -> usize { DEFAULT_SUGGESTION_LIMIT }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "cookable", "cookable")
}

impl Config {
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.general
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn catalog_path(&self) -> PathBuf {
        if let Some(path) = &self.general.catalog {
            return path.clone();
        }
        match self.data_dir() {
            Some(dir) => dir.join("recipes.json"),
            None => PathBuf::from("recipes.json"),
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn load_config() -> Result<Config> {
    let config_path = if let Some(dirs) = project_dirs() {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };
    load_config_from(&config_path)
}
