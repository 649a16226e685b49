pub mod markdown_service;
pub mod page_index;
pub mod page_store;
pub mod recipe_parser;

pub use markdown_service::MarkdownService;
pub use page_index::PageIndex;
pub use page_store::PageStore;
