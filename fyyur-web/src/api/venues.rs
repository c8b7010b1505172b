//! Venue handlers
//!
//! Reads run on a pooled connection; every write runs in its own transaction
//! that commits only when the whole operation succeeded.

use axum::{
    extract::{RawForm, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use fyyur_common::db::{venues, Party};
use fyyur_common::{listing, time};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::ui::{self, Notice};
use super::{failure_notice, RecordId, SearchForm};
use crate::error::ApiResult;
use crate::forms::{self, FormData};
use crate::AppState;

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let groups = listing::venue_locations(&mut conn, &time::now()).await?;
    debug!("Listing {} venue location group(s)", groups.len());
    Ok(Html(ui::venues::venues_page(&groups, None)))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let results = listing::search_venues(&mut conn, &search.search_term, &time::now()).await?;
    debug!(
        "Venue search {:?} matched {} record(s)",
        search.search_term, results.count
    );
    Ok(Html(ui::search::search_results_page(
        Party::Venue,
        &search.search_term,
        &results,
    )))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let detail = listing::venue_detail(&mut conn, id, &time::now()).await?;
    Ok(Html(ui::venues::venue_detail_page(&detail, None)))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(ui::forms::venue_form_page(None))
}

/// POST /venues/create
///
/// Success and failure both land on the home page; the notice says which.
pub async fn create_venue(State(state): State<AppState>, RawForm(body): RawForm) -> Response {
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    match insert_venue(&state.db, &form).await {
        Ok(id) => {
            info!("Created venue {} ({})", id, name);
            let notice = Notice::Success(format!("Venue {} was successfully listed!", name));
            Html(ui::home_page(Some(&notice))).into_response()
        }
        Err(err) => {
            err.log("Venue create failed");
            let notice = failure_notice(&err, &format!("Venue {} could not be listed.", name));
            (err.status(), Html(ui::home_page(Some(&notice)))).into_response()
        }
    }
}

async fn insert_venue(pool: &SqlitePool, form: &FormData) -> ApiResult<i64> {
    let profile = forms::venue_profile(form)?;
    let mut tx = pool.begin().await?;
    let id = venues::insert_venue(&mut tx, &profile).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let venue = venues::require_venue(&mut conn, id).await?;
    Ok(Html(ui::forms::venue_form_page(Some((venue.id, &venue.profile)))))
}

/// POST /venues/:id/edit
///
/// Redirects to the venue page on success. On failure the stored venue is
/// shown unchanged with the error notice.
pub async fn edit_venue(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    RawForm(body): RawForm,
) -> ApiResult<Response> {
    let form = FormData::parse(&body);

    let err = match update_venue(&state.db, id, &form).await {
        Ok(()) => {
            info!("Updated venue {}", id);
            return Ok(Redirect::to(&format!("/venues/{}", id)).into_response());
        }
        Err(err) if err.status() == StatusCode::NOT_FOUND => return Err(err),
        Err(err) => err,
    };

    err.log("Venue update failed");
    let mut conn = state.db.acquire().await?;
    let detail = listing::venue_detail(&mut conn, id, &time::now()).await?;
    let notice = failure_notice(
        &err,
        &format!("Venue {} could not be updated.", detail.venue.profile.name),
    );
    let page = ui::venues::venue_detail_page(&detail, Some(&notice));
    Ok((err.status(), Html(page)).into_response())
}

async fn update_venue(pool: &SqlitePool, id: i64, form: &FormData) -> ApiResult<()> {
    let profile = forms::venue_profile(form)?;
    let mut tx = pool.begin().await?;
    venues::require_venue(&mut tx, id).await?;
    venues::update_venue(&mut tx, id, &profile).await?;
    tx.commit().await?;
    Ok(())
}

/// DELETE /venues/:id
///
/// Removes the venue together with every show booked there.
pub async fn delete_venue(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Html<String>> {
    let mut tx = state.db.begin().await?;
    let removed_shows = venues::delete_venue(&mut tx, id).await?;
    tx.commit().await?;

    info!("Deleted venue {} and {} show(s)", id, removed_shows);
    let notice = Notice::Success(format!("Venue {} was successfully deleted.", id));
    Ok(Html(ui::home_page(Some(&notice))))
}
