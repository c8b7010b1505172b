//! UI Routes - server-rendered HTML pages
//!
//! # Structure
//! Handlers in `api::venues`, `api::artists` and `api::shows` load data and
//! call the render functions here, which return complete HTML documents:
//!
//! - **Layout** (this module): page frame, notices, home and error pages
//! - **Venues** (`venues`): grouped listing, detail page
//! - **Artists** (`artists`): listing, detail page
//! - **Shows** (`shows`): show listing
//! - **Search** (`search`): search results for venues and artists
//! - **Forms** (`forms`): create/edit forms
//!
//! Every interpolated value passes through [`escape`].

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

pub mod artists;
pub mod forms;
pub mod search;
pub mod shows;
pub mod venues;

const FYYUR_CSS: &str = include_str!("static/fyyur.css");

/// Build UI routes (home page and static assets)
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/static/fyyur.css", get(serve_css))
}

/// GET /
async fn home() -> Html<String> {
    Html(home_page(None))
}

/// GET /static/fyyur.css
async fn serve_css() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/css; charset=utf-8")],
        FYYUR_CSS,
    )
        .into_response()
}

/// Fallback for unknown paths
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(error_page(StatusCode::NOT_FOUND, "The page you requested does not exist.")),
    )
        .into_response()
}

/// One-shot message shown above page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, message) = match self {
            Notice::Success(message) => ("success", message),
            Notice::Error(message) => ("error", message),
        };
        format!(r#"<div class="notice {}">{}</div>"#, class, escape(message))
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap `body` (already escaped) in the site frame
pub fn layout(title: &str, notice: Option<&Notice>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <link rel="stylesheet" href="/static/fyyur.css">
</head>
<body>
    <nav>
        <a class="brand" href="/">🔥 Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <a href="/venues/create">Post a venue</a>
        <a href="/artists/create">Post an artist</a>
        <a href="/shows/create">Post a show</a>
    </nav>
    {notice}
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        notice = notice.map(Notice::render).unwrap_or_default(),
        body = body,
    )
}

pub fn home_page(notice: Option<&Notice>) -> String {
    layout(
        "Home",
        notice,
        r#"<h1>Fyyur</h1>
<p>Find live music venues and artists, and book the next show.</p>
<p>
    <a class="button" href="/venues">Browse venues</a>
    <a class="button" href="/artists">Browse artists</a>
    <a class="button" href="/shows">Upcoming shows</a>
</p>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        s if s.is_client_error() => "Request could not be processed",
        _ => "Something went wrong",
    };

    layout(
        heading,
        None,
        &format!(
            "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to home</a></p>",
            status.as_u16(),
            escape(heading),
            escape(message)
        ),
    )
}

/// Comma-free genre badges
pub(crate) fn genre_badges(genres: &[String]) -> String {
    let badges: Vec<String> = genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape(g)))
        .collect();
    format!(r#"<p class="genres">{}</p>"#, badges.join(""))
}

/// `<a>` for an optional external link, or nothing
pub(crate) fn external_link(label: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            "<p>{}: <a href=\"{}\" rel=\"noopener\">{}</a></p>",
            escape(label),
            escape(url),
            escape(url)
        ),
        None => String::new(),
    }
}

/// Shared markup for the venue/artist search box
pub(crate) fn search_box(action: &str, placeholder: &str, term: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
    <input type="search" name="search_term" placeholder="{placeholder}" value="{term}">
    <button class="button" type="submit">Search</button>
</form>"#,
        action = escape(action),
        placeholder = escape(placeholder),
        term = escape(term),
    )
}
