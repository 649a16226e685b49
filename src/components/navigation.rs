use log::debug;

use crate::types::IndexEntry;
use crate::utils::{escape_attr, escape_html};

/// Component rendering the page index as sidebar navigation
pub struct NavigationComponent<'a> {
    entries: &'a [IndexEntry],
}

impl<'a> NavigationComponent<'a> {
    pub fn new(entries: &'a [IndexEntry]) -> Self {
        Self { entries }
    }

    /// Build the sidebar HTML, marking the entry for `current_slug` active
    pub fn build_sidebar_html(&self, current_slug: &str) -> String {
        debug!("Building sidebar with {} entries for '{}'", self.entries.len(), current_slug);
        let current_url = format!("/view/{}", current_slug);

        let mut html = String::new();
        html.push_str("<nav class=\"sidebar-nav\">");
        html.push_str("<div class=\"sidebar-title\">Recipes</div>");
        html.push_str("<ul class=\"nav-list\">");
        for entry in self.entries {
            let class = if entry.url == current_url { " class=\"active\"" } else { "" };
            html.push_str(&format!(
                "<li{}><a href=\"{}\">{}</a></li>",
                class,
                escape_attr(&entry.url),
                escape_html(&entry.title)
            ));
        }
        html.push_str("</ul></nav>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entries_in_order_and_marks_current() {
        let entries = vec![IndexEntry::for_slug("Home"), IndexEntry::for_slug("Banana-Bread")];
        let html = NavigationComponent::new(&entries).build_sidebar_html("Banana-Bread");

        let home = html.find("<a href=\"/view/Home\">Home</a>").unwrap();
        let bread = html
            .find("<li class=\"active\"><a href=\"/view/Banana-Bread\">Banana Bread</a></li>")
            .unwrap();
        assert!(home < bread);
    }
}
