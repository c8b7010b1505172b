//! Artist handlers

use axum::{
    extract::{RawForm, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use fyyur_common::db::{artists, Party};
use fyyur_common::{listing, time};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::ui::{self, Notice};
use super::{failure_notice, RecordId, SearchForm};
use crate::error::ApiResult;
use crate::forms::{self, FormData};
use crate::AppState;

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artists = listing::list_artists(&mut conn).await?;
    Ok(Html(ui::artists::artists_page(&artists, None)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let results = listing::search_artists(&mut conn, &search.search_term, &time::now()).await?;
    debug!(
        "Artist search {:?} matched {} record(s)",
        search.search_term, results.count
    );
    Ok(Html(ui::search::search_results_page(
        Party::Artist,
        &search.search_term,
        &results,
    )))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let detail = listing::artist_detail(&mut conn, id, &time::now()).await?;
    Ok(Html(ui::artists::artist_detail_page(&detail, None)))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(ui::forms::artist_form_page(None))
}

/// POST /artists/create
pub async fn create_artist(State(state): State<AppState>, RawForm(body): RawForm) -> Response {
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    match insert_artist(&state.db, &form).await {
        Ok(id) => {
            info!("Created artist {} ({})", id, name);
            let notice = Notice::Success(format!("Artist {} was successfully listed!", name));
            Html(ui::home_page(Some(&notice))).into_response()
        }
        Err(err) => {
            err.log("Artist create failed");
            let notice = failure_notice(&err, &format!("Artist {} could not be listed.", name));
            (err.status(), Html(ui::home_page(Some(&notice)))).into_response()
        }
    }
}

async fn insert_artist(pool: &SqlitePool, form: &FormData) -> ApiResult<i64> {
    let profile = forms::artist_profile(form)?;
    let mut tx = pool.begin().await?;
    let id = artists::insert_artist(&mut tx, &profile).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artist = artists::require_artist(&mut conn, id).await?;
    Ok(Html(ui::forms::artist_form_page(Some((artist.id, &artist.profile)))))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    RawForm(body): RawForm,
) -> ApiResult<Response> {
    let form = FormData::parse(&body);

    let err = match update_artist(&state.db, id, &form).await {
        Ok(()) => {
            info!("Updated artist {}", id);
            return Ok(Redirect::to(&format!("/artists/{}", id)).into_response());
        }
        Err(err) if err.status() == StatusCode::NOT_FOUND => return Err(err),
        Err(err) => err,
    };

    err.log("Artist update failed");
    let mut conn = state.db.acquire().await?;
    let detail = listing::artist_detail(&mut conn, id, &time::now()).await?;
    let notice = failure_notice(
        &err,
        &format!("Artist {} could not be updated.", detail.artist.profile.name),
    );
    let page = ui::artists::artist_detail_page(&detail, Some(&notice));
    Ok((err.status(), Html(page)).into_response())
}

async fn update_artist(pool: &SqlitePool, id: i64, form: &FormData) -> ApiResult<()> {
    let profile = forms::artist_profile(form)?;
    let mut tx = pool.begin().await?;
    artists::require_artist(&mut tx, id).await?;
    artists::update_artist(&mut tx, id, &profile).await?;
    tx.commit().await?;
    Ok(())
}

/// DELETE /artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut tx = state.db.begin().await?;
    let removed_shows = artists::delete_artist(&mut tx, id).await?;
    tx.commit().await?;

    info!("Deleted artist {} and {} show(s)", id, removed_shows);
    let notice = Notice::Success(format!("Artist {} was successfully deleted.", id));
    Ok(Html(ui::home_page(Some(&notice))))
}
