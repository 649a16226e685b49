//! Pantry - a small personal recipe wiki served over HTTP
//!
//! Pages live as flat `<slug>.txt` files with an ingredients and an
//! instructions section, rendered through Markdown and `[[Page Name]]` links.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use handlers::router;
pub use types::{AppState, IndexEntry, Page};
pub use services::{MarkdownService, PageIndex, PageStore};
pub use components::{NavigationComponent, TemplateComponent};
