use std::sync::{Arc, RwLock};

use crate::config::Config;
use crate::services::{PageIndex, PageStore};
use crate::services::page_store::slugify;
use crate::services::recipe_parser::normalize_section;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: PageStore,
    pub index: Arc<RwLock<PageIndex>>,
}

impl AppState {
    /// Build the state for `config`, creating the pages directory and
    /// computing the initial index.
    pub fn new(config: Config) -> Result<Self, crate::errors::WikiError> {
        let store = PageStore::new(config.pages_dir.as_ref().clone());
        store.ensure_dir()?;

        let mut index = PageIndex::new(&config.home_title);
        index.refresh(store.pages_dir());

        Ok(Self {
            config: Arc::new(config),
            store,
            index: Arc::new(RwLock::new(index)),
        })
    }
}

/// A single recipe page, built per request and dropped afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub filename: String,
    pub ingredients: String,
    pub instructions: String,
}

impl Page {
    /// Create a page from user-supplied text; the filename follows the title.
    pub fn new(title: &str, ingredients: &str, instructions: &str) -> Self {
        Self {
            title: title.to_string(),
            filename: slugify(title),
            ingredients: normalize_section(ingredients),
            instructions: normalize_section(instructions),
        }
    }

    /// An empty page used when creating something that is not stored yet
    pub fn empty(title: &str) -> Self {
        Self::new(title, "", "")
    }
}

/// One row of the page index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub url: String,
}

impl IndexEntry {
    pub fn for_slug(slug: &str) -> Self {
        Self {
            title: crate::services::page_store::title_from_slug(slug),
            url: format!("/view/{}", slug),
        }
    }
}

/// Template rendering context
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub content: String,
    pub sidebar: String,
}
