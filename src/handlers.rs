use axum::{
    body::Body,
    extract::{Form, Path as AxumPath, State},
    http::{header, HeaderValue, Response},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::PoisonError;

use crate::components::{NavigationComponent, TemplateComponent};
use crate::errors::WikiError;
use crate::services::page_store::{is_valid_slug, slugify, title_from_slug};
use crate::services::recipe_parser::normalize_section;
use crate::services::MarkdownService;
use crate::types::{AppState, Page};
use crate::utils::{content_type_for, ensure_safe_path, last_modified_html};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/view/:slug", get(handle_view))
        .route("/edit/:slug", get(handle_edit))
        .route("/save/:slug", post(handle_save))
        .route("/resources/*path", get(handle_resource))
        .with_state(state)
}

/// Fields posted by the edit form
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(rename = "recipeTitle", alias = "title", default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    /// Free-form body of the home page
    #[serde(default)]
    pub body: String,
}

fn checked_slug(slug: &str) -> Result<(), WikiError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        log::warn!("Rejecting invalid page slug: {:?}", slug);
        Err(WikiError::NotFound)
    }
}

fn sidebar(state: &AppState, current_slug: &str) -> String {
    let index = state.index.read().unwrap_or_else(PoisonError::into_inner);
    NavigationComponent::new(index.entries()).build_sidebar_html(current_slug)
}

fn refresh_index(state: &AppState) {
    state
        .index
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .refresh(state.store.pages_dir());
}

fn templates(state: &AppState) -> TemplateComponent {
    TemplateComponent::new(state.config.templates_dir.as_ref().clone())
}

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("/view/{}", state.config.home_slug()))
}

/// Render a page, or send the client to the editor when it does not exist
pub async fn handle_view(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Result<Response<Body>, WikiError> {
    checked_slug(&slug)?;
    log::info!("View request for '{}'", slug);

    if slug == state.config.home_slug() {
        return render_home(&state, &slug);
    }

    let page = match state.store.load(&slug) {
        Ok(page) => page,
        Err(WikiError::NotFound) => {
            log::debug!("Page '{}' missing, redirecting to editor", slug);
            return Ok(Redirect::to(&format!("/edit/{}", slug)).into_response());
        }
        Err(e) => return Err(e),
    };

    let markdown = MarkdownService::new();
    let ingredients = markdown.render(&page.ingredients);
    let instructions = markdown.render(&page.instructions);
    let meta = last_modified_html(state.store.modified(&slug));
    let html = templates(&state).render_view(&page, &ingredients, &instructions, &meta, &sidebar(&state, &slug))?;
    Ok(Html(html).into_response())
}

/// The home page is stored as one free-form body; a missing file reads as empty
fn load_home_body(state: &AppState, slug: &str) -> Result<String, WikiError> {
    match state.store.load_raw(slug) {
        Err(WikiError::NotFound) => {
            log::debug!("Home page '{}' has no file yet", slug);
            Ok(String::new())
        }
        other => other,
    }
}

fn render_home(state: &AppState, slug: &str) -> Result<Response<Body>, WikiError> {
    let body = load_home_body(state, slug)?;
    let body_html = MarkdownService::new().render(&body);
    let meta = last_modified_html(state.store.modified(slug));
    let html = templates(state).render_home(&state.config.home_title, slug, &body_html, &meta, &sidebar(state, slug))?;
    Ok(Html(html).into_response())
}

/// Show the edit form for an existing page or a blank one for a new page
pub async fn handle_edit(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Result<Html<String>, WikiError> {
    checked_slug(&slug)?;
    log::info!("Edit request for '{}'", slug);

    if slug == state.config.home_slug() {
        let body = load_home_body(&state, &slug)?;
        let html = templates(&state).render_edit_home(&state.config.home_title, &slug, &body, &sidebar(&state, &slug))?;
        return Ok(Html(html));
    }

    let page = match state.store.load(&slug) {
        Ok(page) => page,
        Err(WikiError::NotFound) => Page::empty(&title_from_slug(&slug)),
        Err(e) => return Err(e),
    };

    let html = templates(&state).render_edit(&page, &sidebar(&state, &slug))?;
    Ok(Html(html))
}

/// Persist a submitted page, handling renames, then refresh the index
pub async fn handle_save(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
    Form(form): Form<SaveForm>,
) -> Result<Redirect, WikiError> {
    checked_slug(&slug)?;

    if slug == state.config.home_slug() {
        state.store.save_raw(&slug, &normalize_section(&form.body))?;
        refresh_index(&state);
        log::info!("Saved home page '{}'", slug);
        return Ok(Redirect::to(&format!("/view/{}", slug)));
    }

    let title = match form.title.trim() {
        "" => title_from_slug(&slug),
        title => title.to_string(),
    };
    if !is_valid_slug(&slugify(&title)) {
        log::warn!("Rejecting save of '{}' under invalid title {:?}", slug, title);
        return Err(WikiError::InvalidTitle(title));
    }

    let page = Page::new(&title, &form.ingredients, &form.instructions);
    // the new file may exist even when removing the old one failed
    let saved = state.store.save(&page, Some(&slug));
    refresh_index(&state);
    let new_slug = saved?;

    log::info!("Saved '{}' (was '{}')", new_slug, slug);
    Ok(Redirect::to(&format!("/view/{}", new_slug)))
}

/// Serve static files from the resources directory
pub async fn handle_resource(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response<Body>, WikiError> {
    ensure_safe_path(&path)?;
    let full_path = state.config.resources_dir.join(&path);
    if !full_path.is_file() {
        return Err(WikiError::NotFound);
    }

    let bytes = std::fs::read(&full_path)?;
    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type_for(&full_path)));
    Ok(resp)
}
