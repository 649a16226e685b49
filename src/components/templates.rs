use std::fs;
use std::path::PathBuf;

use crate::errors::WikiError;
use crate::types::{Page, TemplateContext};
use crate::utils::{escape_attr, escape_html};

const STYLE_LINK: &str = "<link rel=\"stylesheet\" href=\"/resources/css/pantry.css\">";

/// Component for handling HTML template rendering
pub struct TemplateComponent {
    templates_dir: PathBuf,
}

impl TemplateComponent {
    pub fn new(templates_dir: PathBuf) -> Self {
        Self { templates_dir }
    }

    /// Load and render the main HTML shell template.
    ///
    /// `<templates_dir>/base.html` is used when present; otherwise an inline shell.
    pub fn render_shell_template(&self, context: &TemplateContext) -> Result<String, WikiError> {
        let base_path = self.templates_dir.join("base.html");
        let title = escape_html(&context.title);

        match fs::read_to_string(&base_path) {
            Ok(base) => Ok(base
                .replace("{{TITLE}}", &title)
                .replace("{{STYLE}}", STYLE_LINK)
                .replace("{{SIDEBAR}}", &context.sidebar)
                .replace("{{CONTENT}}", &context.content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(format!(
                "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{}</title>{}</head><body><div class=\"layout\"><aside class=\"sidebar\">{}</aside><main class=\"content\">{}</main></div></body></html>",
                title, STYLE_LINK, context.sidebar, context.content
            )),
            Err(e) => Err(WikiError::TemplateError(format!("{}: {}", base_path.display(), e))),
        }
    }

    /// Render a recipe whose sections are already converted to HTML
    pub fn render_view(
        &self,
        page: &Page,
        ingredients_html: &str,
        instructions_html: &str,
        meta: &str,
        sidebar: &str,
    ) -> Result<String, WikiError> {
        let content = format!(
            "<article class=\"recipe\"><h1>{title}</h1>{meta}\
             <section class=\"ingredients\"><h2>Ingredients</h2>{ingredients}</section>\
             <section class=\"instructions\"><h2>Instructions</h2>{instructions}</section>\
             <p class=\"actions\"><a href=\"/edit/{slug}\">Edit</a></p></article>",
            title = escape_html(&page.title),
            meta = meta,
            ingredients = ingredients_html,
            instructions = instructions_html,
            slug = escape_attr(&page.filename),
        );
        self.render_shell_template(&TemplateContext {
            title: page.title.clone(),
            content,
            sidebar: sidebar.to_string(),
        })
    }

    /// Render the edit form for `page`, posting back to its current slug
    pub fn render_edit(&self, page: &Page, sidebar: &str) -> Result<String, WikiError> {
        let content = format!(
            "<h1>Editing {title}</h1>\
             <form class=\"edit\" action=\"/save/{slug}\" method=\"POST\">\
             <label>Title <input type=\"text\" name=\"recipeTitle\" value=\"{title_attr}\" pattern=\"[-a-zA-Z0-9 ]+\"></label>\
             <label>Ingredients<textarea name=\"ingredients\" rows=\"12\" cols=\"80\">{ingredients}</textarea></label>\
             <label>Instructions<textarea name=\"instructions\" rows=\"20\" cols=\"80\">{instructions}</textarea></label>\
             <input type=\"submit\" value=\"Save\"></form>",
            title = escape_html(&page.title),
            slug = escape_attr(&page.filename),
            title_attr = escape_attr(&page.title),
            ingredients = escape_html(&page.ingredients),
            instructions = escape_html(&page.instructions),
        );
        self.render_shell_template(&TemplateContext {
            title: format!("Editing {}", page.title),
            content,
            sidebar: sidebar.to_string(),
        })
    }

    /// Render the single-body edit form used for the home page
    pub fn render_edit_home(&self, title: &str, slug: &str, body: &str, sidebar: &str) -> Result<String, WikiError> {
        let content = format!(
            "<h1>Editing {title}</h1>\
             <form class=\"edit\" action=\"/save/{slug}\" method=\"POST\">\
             <label>Body<textarea name=\"body\" rows=\"24\" cols=\"80\">{body}</textarea></label>\
             <input type=\"submit\" value=\"Save\"></form>",
            title = escape_html(title),
            slug = escape_attr(slug),
            body = escape_html(body),
        );
        self.render_shell_template(&TemplateContext {
            title: format!("Editing {}", title),
            content,
            sidebar: sidebar.to_string(),
        })
    }

    /// Render the home page: a free-form body followed by the full index
    pub fn render_home(
        &self,
        title: &str,
        slug: &str,
        body_html: &str,
        meta: &str,
        sidebar: &str,
    ) -> Result<String, WikiError> {
        let content = format!(
            "<article class=\"home\"><h1>{}</h1>{}{}<p class=\"actions\"><a href=\"/edit/{}\">Edit</a></p></article>",
            escape_html(title),
            meta,
            body_html,
            escape_attr(slug)
        );
        self.render_shell_template(&TemplateContext {
            title: title.to_string(),
            content,
            sidebar: sidebar.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_escapes_user_text() {
        let dir = tempfile::tempdir().unwrap();
        let templates = TemplateComponent::new(dir.path().to_path_buf());
        let page = Page::new("Soup", "</textarea><script>x</script>", "");
        let html = templates.render_edit(&page, "").unwrap();

        assert!(html.contains("action=\"/save/Soup\""));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn base_template_placeholders_are_filled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.html"),
            "<title>{{TITLE}}</title>{{STYLE}}<nav>{{SIDEBAR}}</nav><main>{{CONTENT}}</main>",
        )
        .unwrap();
        let templates = TemplateComponent::new(dir.path().to_path_buf());
        let html = templates
            .render_shell_template(&TemplateContext {
                title: "Fish & Chips".to_string(),
                content: "<p>hi</p>".to_string(),
                sidebar: "<ul></ul>".to_string(),
            })
            .unwrap();

        assert_eq!(
            html,
            format!("<title>Fish &amp; Chips</title>{}<nav><ul></ul></nav><main><p>hi</p></main>", STYLE_LINK)
        );
    }
}
