//! Show persistence
//!
//! Shows are created once and never edited. Both references are checked
//! inside the caller's transaction before the insert.

use crate::db::models::{NewShow, Party};
use crate::db::{artists, venues};
use crate::time::format_start_time;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

/// One end of a show with the other end resolved
///
/// `counterpart_name` is `None` when the referenced record is missing.
#[derive(Debug, Clone)]
pub struct ShowCounterpartRow {
    pub show_id: i64,
    pub start_time: NaiveDateTime,
    pub counterpart_id: i64,
    pub counterpart_name: Option<String>,
    pub counterpart_image_link: Option<String>,
}

/// A show joined with both of its ends
///
/// Name columns are `None` when the referenced record is missing.
#[derive(Debug, Clone)]
pub struct ShowJoinRow {
    pub show_id: i64,
    pub start_time: NaiveDateTime,
    pub venue_id: i64,
    pub venue_name: Option<String>,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: Option<String>,
    pub artist_image_link: Option<String>,
}

/// Insert a show after checking that both ends exist
///
/// Fails with `Referential` before touching the table when either id is
/// unknown.
pub async fn insert_show(conn: &mut SqliteConnection, show: &NewShow) -> Result<i64> {
    let artist_known = artists::artist_exists(conn, show.artist_id).await?;
    let venue_known = venues::venue_exists(conn, show.venue_id).await?;

    match (artist_known, venue_known) {
        (true, true) => {}
        (false, true) => {
            return Err(Error::Referential(format!(
                "Artist {} does not exist",
                show.artist_id
            )))
        }
        (true, false) => {
            return Err(Error::Referential(format!(
                "Venue {} does not exist",
                show.venue_id
            )))
        }
        (false, false) => {
            return Err(Error::Referential(format!(
                "Artist {} and venue {} do not exist",
                show.artist_id, show.venue_id
            )))
        }
    }

    let result =
        sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
            .bind(show.artist_id)
            .bind(show.venue_id)
            .bind(format_start_time(&show.start_time))
            .execute(&mut *conn)
            .await?;

    let id = result.last_insert_rowid();
    debug!(
        "Inserted show {} (artist {}, venue {})",
        id, show.artist_id, show.venue_id
    );
    Ok(id)
}

/// Shows anchored on one party with the other end resolved
pub async fn counterparts_for(
    conn: &mut SqliteConnection,
    party: Party,
    id: i64,
) -> Result<Vec<ShowCounterpartRow>> {
    let other = party.counterpart();
    let sql = format!(
        r#"
        SELECT s.id AS show_id, s.start_time, s.{other_col} AS counterpart_id,
               o.name AS counterpart_name, o.image_link AS counterpart_image_link
        FROM shows s
        LEFT JOIN {other_table} o ON o.id = s.{other_col}
        WHERE s.{anchor_col} = ?
        ORDER BY s.start_time, s.id
        "#,
        other_col = other.show_column(),
        other_table = other.table(),
        anchor_col = party.show_column(),
    );

    let rows = sqlx::query(&sql).bind(id).fetch_all(&mut *conn).await?;

    Ok(rows
        .iter()
        .map(|row| ShowCounterpartRow {
            show_id: row.get("show_id"),
            start_time: row.get("start_time"),
            counterpart_id: row.get("counterpart_id"),
            counterpart_name: row.get("counterpart_name"),
            counterpart_image_link: row.get("counterpart_image_link"),
        })
        .collect())
}

/// Every show joined with its venue and artist, ordered by start time
pub async fn list_show_joins(conn: &mut SqliteConnection) -> Result<Vec<ShowJoinRow>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id AS show_id, s.start_time, s.venue_id, s.artist_id,
               v.name AS venue_name, v.image_link AS venue_image_link,
               a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        LEFT JOIN venues v ON v.id = s.venue_id
        LEFT JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ShowJoinRow {
            show_id: row.get("show_id"),
            start_time: row.get("start_time"),
            venue_id: row.get("venue_id"),
            venue_name: row.get("venue_name"),
            venue_image_link: row.get("venue_image_link"),
            artist_id: row.get("artist_id"),
            artist_name: row.get("artist_name"),
            artist_image_link: row.get("artist_image_link"),
        })
        .collect())
}

/// `(party id, start time)` for every show
pub async fn start_times_by(
    conn: &mut SqliteConnection,
    party: Party,
) -> Result<Vec<(i64, NaiveDateTime)>> {
    let rows = sqlx::query(&format!(
        "SELECT {} AS party_id, start_time FROM shows",
        party.show_column()
    ))
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get("party_id"), row.get("start_time")))
        .collect())
}

pub async fn delete_shows_for_venue(conn: &mut SqliteConnection, venue_id: i64) -> Result<u64> {
    delete_shows_for(conn, Party::Venue, venue_id).await
}

pub async fn delete_shows_for_artist(conn: &mut SqliteConnection, artist_id: i64) -> Result<u64> {
    delete_shows_for(conn, Party::Artist, artist_id).await
}

async fn delete_shows_for(conn: &mut SqliteConnection, party: Party, id: i64) -> Result<u64> {
    let result = sqlx::query(&format!("DELETE FROM shows WHERE {} = ?", party.show_column()))
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_shows(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
