use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::services::recipe_parser;
use crate::types::Page;

pub const PAGE_EXTENSION: &str = "txt";

/// Turn a display title into its storage slug
pub fn slugify(title: &str) -> String {
    title.replace(' ', "-")
}

/// Turn a storage slug back into a display title
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Slugs accepted in URLs and as file stems: ASCII letters, digits and hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Flat-file storage for pages, one `<slug>.txt` per page
#[derive(Clone, Debug)]
pub struct PageStore {
    pages_dir: PathBuf,
}

impl PageStore {
    pub fn new(pages_dir: PathBuf) -> Self {
        debug!("Creating PageStore with pages directory: {:?}", pages_dir);
        Self { pages_dir }
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Create the pages directory if it is missing
    pub fn ensure_dir(&self) -> Result<(), WikiError> {
        if !self.pages_dir.is_dir() {
            info!("Creating pages directory {:?}", self.pages_dir);
            fs::create_dir_all(&self.pages_dir)?;
        }
        Ok(())
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.pages_dir.join(format!("{}.{}", slug, PAGE_EXTENSION))
    }

    /// Read the stored body of `slug` without splitting it into sections
    pub fn load_raw(&self, slug: &str) -> Result<String, WikiError> {
        let path = self.path_for(slug);
        debug!("Reading page {:?}", path);
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                debug!("Page does not exist: {:?}", path);
                WikiError::NotFound
            } else {
                error!("Failed to read page {:?}: {}", path, e);
                WikiError::Io(e)
            }
        })
    }

    /// Load and parse the page stored under `slug`
    pub fn load(&self, slug: &str) -> Result<Page, WikiError> {
        let content = self.load_raw(slug)?;
        let (ingredients, instructions) = recipe_parser::parse(&content).map_err(|e| {
            warn!("Page {:?} is malformed: {}", slug, e);
            e
        })?;

        Ok(Page {
            title: title_from_slug(slug),
            filename: slug.to_string(),
            ingredients,
            instructions,
        })
    }

    /// Write `page` under the slug of its title.
    ///
    /// When `previous_slug` names a different file that still exists, that file
    /// is removed so exactly one file backs the page afterwards. Returns the
    /// slug the page was written to.
    pub fn save(&self, page: &Page, previous_slug: Option<&str>) -> Result<String, WikiError> {
        let slug = slugify(&page.title);
        let path = self.path_for(&slug);
        let body = recipe_parser::serialize(&page.ingredients, &page.instructions);

        fs::write(&path, body).map_err(|e| {
            error!("Failed to write page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;
        info!("Saved page '{}' to {:?}", page.title, path);

        if let Some(old) = previous_slug.filter(|old| *old != slug) {
            self.remove(old)?;
        }

        Ok(slug)
    }

    /// Write a free-form body under `slug`, with no sections
    pub fn save_raw(&self, slug: &str, body: &str) -> Result<(), WikiError> {
        let path = self.path_for(slug);
        fs::write(&path, body).map_err(|e| {
            error!("Failed to write page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;
        info!("Saved free-form page {:?}", path);
        Ok(())
    }

    /// Remove the file backing `slug`; a file that is already gone is fine.
    fn remove(&self, slug: &str) -> Result<(), WikiError> {
        let path = self.path_for(slug);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed renamed page {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Previous page file {:?} does not exist, nothing to remove", path);
                Ok(())
            }
            Err(e) => {
                error!("Failed to remove renamed page {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Last modification time of the file backing `slug`, if any
    pub fn modified(&self, slug: &str) -> Option<std::time::SystemTime> {
        fs::metadata(self.path_for(slug)).and_then(|m| m.modified()).ok()
    }
}
