use std::fs;
use std::path::Path;
use log::{debug, error, info};

use crate::errors::WikiError;
use crate::services::page_store::{is_valid_slug, slugify, PAGE_EXTENSION};
use crate::types::IndexEntry;

/// Sorted list of every stored page, with the home page pinned first
#[derive(Debug, Clone)]
pub struct PageIndex {
    home_slug: String,
    entries: Vec<IndexEntry>,
}

impl PageIndex {
    /// An index that only knows about the home page
    pub fn new(home_title: &str) -> Self {
        let home_slug = slugify(home_title);
        let entries = vec![IndexEntry::for_slug(&home_slug)];
        Self { home_slug, entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Rescan `pages_dir` and replace the entries.
    ///
    /// Dotfiles, non-page files and the home page's own file are skipped; the
    /// home entry is always first even when its file does not exist yet.
    pub fn rebuild(&mut self, pages_dir: &Path) -> Result<(), WikiError> {
        debug!("Rebuilding page index from {:?}", pages_dir);
        let mut pages = Vec::new();
        for entry in fs::read_dir(pages_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let Some(slug) = name
                .strip_suffix(PAGE_EXTENSION)
                .and_then(|stem| stem.strip_suffix('.'))
            else {
                continue;
            };
            if slug == self.home_slug {
                continue;
            }
            if !is_valid_slug(slug) {
                debug!("Skipping {:?}: not a routable page name", name);
                continue;
            }
            pages.push(IndexEntry::for_slug(slug));
        }
        pages.sort_by(|a, b| a.title.cmp(&b.title));

        let mut entries = Vec::with_capacity(pages.len() + 1);
        entries.push(IndexEntry::for_slug(&self.home_slug));
        entries.extend(pages);
        self.entries = entries;

        info!("Page index rebuilt with {} entries", self.entries.len());
        Ok(())
    }

    /// Rebuild, keeping the previous entries when the scan fails
    pub fn refresh(&mut self, pages_dir: &Path) {
        if let Err(e) = self.rebuild(pages_dir) {
            error!("Failed to rebuild page index from {:?}, keeping stale index: {}", pages_dir, e);
        }
    }
}
