//! Show handlers

use axum::{
    extract::{RawForm, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use fyyur_common::db::{shows, venues};
use fyyur_common::listing;
use sqlx::SqlitePool;
use tracing::info;

use super::failure_notice;
use super::ui::{self, Notice};
use crate::error::ApiResult;
use crate::forms::{self, FormData};
use crate::AppState;

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let shows = listing::list_shows(&mut conn).await?;
    Ok(Html(ui::shows::shows_page(&shows, None)))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artists = listing::list_artists(&mut conn).await?;
    let venues = venues::list_venue_names(&mut conn).await?;
    Ok(Html(ui::forms::show_form_page(&artists, &venues)))
}

/// POST /shows/create
///
/// Both referenced records are checked inside the insert transaction.
pub async fn create_show(State(state): State<AppState>, RawForm(body): RawForm) -> Response {
    let form = FormData::parse(&body);

    match insert_show(&state.db, &form).await {
        Ok(id) => {
            info!("Created show {}", id);
            let notice = Notice::Success("Show was successfully listed!".to_string());
            Html(ui::home_page(Some(&notice))).into_response()
        }
        Err(err) => {
            err.log("Show create failed");
            let notice = failure_notice(&err, "Show could not be listed.");
            (err.status(), Html(ui::home_page(Some(&notice)))).into_response()
        }
    }
}

async fn insert_show(pool: &SqlitePool, form: &FormData) -> ApiResult<i64> {
    let show = forms::new_show(form)?;
    let mut tx = pool.begin().await?;
    let id = shows::insert_show(&mut tx, &show).await?;
    tx.commit().await?;
    Ok(id)
}
